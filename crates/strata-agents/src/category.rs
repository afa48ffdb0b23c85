//! Per-category params and the agent factory.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use strata_agent::{Agent, AgentKind, AgentParams};

use crate::erosion::{ErosionAgent, ErosionParams};
use crate::plain::{PlainAgent, PlainParams};
use crate::river::{RiverAgent, RiverParams};

/// Params for one agent category, tagged by kind.
///
/// This is the value a phase carries: every agent it spawns gets its own
/// copy of the inner params.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CategoryParams {
    /// Erosion agents.
    Erosion(ErosionParams),
    /// Plain agents.
    Plain(PlainParams),
    /// River agents.
    River(RiverParams),
}

impl CategoryParams {
    /// Default params for `kind`.
    pub fn default_for(kind: AgentKind) -> Self {
        match kind {
            AgentKind::Erosion => Self::Erosion(ErosionParams::default()),
            AgentKind::Plain => Self::Plain(PlainParams::default()),
            AgentKind::River => Self::River(RiverParams::default()),
        }
    }

    /// The category.
    pub fn kind(&self) -> AgentKind {
        match self {
            Self::Erosion(_) => AgentKind::Erosion,
            Self::Plain(_) => AgentKind::Plain,
            Self::River(_) => AgentKind::River,
        }
    }

    /// The inner params through the shared contract.
    pub fn as_params(&self) -> &dyn AgentParams {
        match self {
            Self::Erosion(p) => p,
            Self::Plain(p) => p,
            Self::River(p) => p,
        }
    }

    /// Mutable inner params.
    pub fn as_params_mut(&mut self) -> &mut dyn AgentParams {
        match self {
            Self::Erosion(p) => p,
            Self::Plain(p) => p,
            Self::River(p) => p,
        }
    }

    /// Validate the inner params.
    ///
    /// # Errors
    ///
    /// See [`AgentParams::validate`].
    pub fn validate(&self) -> Result<(), String> {
        self.as_params().validate()
    }

    /// Redraw the inner params from the category's ranges.
    pub fn randomize(&mut self, rng: &mut dyn RngCore) {
        self.as_params_mut().randomize(rng);
    }

    /// Build one uninitialized agent.
    pub fn spawn(&self) -> Box<dyn Agent> {
        match *self {
            Self::Erosion(p) => Box::new(ErosionAgent::new(p)),
            Self::Plain(p) => Box::new(PlainAgent::new(p)),
            Self::River(p) => Box::new(RiverAgent::new(p)),
        }
    }
}

impl From<ErosionParams> for CategoryParams {
    fn from(p: ErosionParams) -> Self {
        Self::Erosion(p)
    }
}

impl From<PlainParams> for CategoryParams {
    fn from(p: PlainParams) -> Self {
        Self::Plain(p)
    }
}

impl From<RiverParams> for CategoryParams {
    fn from(p: RiverParams) -> Self {
        Self::River(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_test_utils::test_rng;

    #[test]
    fn spawn_matches_kind() {
        for kind in [AgentKind::Erosion, AgentKind::Plain, AgentKind::River] {
            let params = CategoryParams::default_for(kind);
            assert_eq!(params.kind(), kind);
            let agent = params.spawn();
            assert_eq!(agent.kind(), kind);
            assert_eq!(agent.tokens(), params.as_params().tokens());
            assert_eq!(agent.position(), None);
        }
    }

    #[test]
    fn defaults_validate() {
        for kind in [AgentKind::Erosion, AgentKind::Plain, AgentKind::River] {
            assert!(CategoryParams::default_for(kind).validate().is_ok());
        }
    }

    #[test]
    fn randomize_keeps_kind() {
        let mut rng = test_rng(1);
        let mut p = CategoryParams::default_for(AgentKind::Plain);
        p.randomize(&mut rng);
        assert_eq!(p.kind(), AgentKind::Plain);
        assert_ne!(p, CategoryParams::default_for(AgentKind::Plain));
    }

    #[test]
    fn serde_uses_kind_tag() {
        let json = r#"{ "kind": "erosion", "tokens": 5, "strength": 0.5 }"#;
        let p: CategoryParams = serde_json::from_str(json).unwrap();
        match p {
            CategoryParams::Erosion(e) => {
                assert_eq!(e.tokens, 5);
                assert_eq!(e.strength, 0.5);
                assert_eq!(e.area_of_effect, ErosionParams::default().area_of_effect);
            }
            other => panic!("expected erosion, got {other:?}"),
        }
    }

    #[test]
    fn invalid_params_are_reported() {
        let p = CategoryParams::from(PlainParams {
            smoothing: 2.0,
            ..PlainParams::default()
        });
        let err = p.validate().unwrap_err();
        assert!(err.contains("smoothing"));
    }
}
