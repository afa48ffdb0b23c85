//! The [`AgentParams`] configuration contract.

use rand::RngCore;

/// Per-category tuning shared by every agent a phase spawns.
///
/// Params are plain values: the scheduler hands each spawned agent its
/// own copy, so agents never share mutable configuration.
pub trait AgentParams {
    /// Starting token budget of each agent.
    fn tokens(&self) -> u32;

    /// Edit radius in grid cells.
    fn area_of_effect(&self) -> f32;

    /// Check every field is in range.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    fn validate(&self) -> Result<(), String>;

    /// Redraw every field uniformly from the category's bounded ranges.
    fn randomize(&mut self, rng: &mut dyn RngCore);
}

/// Check a float field is finite and within `[min, max]`.
pub fn check_range(name: &str, value: f32, min: f32, max: f32) -> Result<(), String> {
    if !value.is_finite() || value < min || value > max {
        return Err(format!("{name} must be in [{min}, {max}], got {value}"));
    }
    Ok(())
}
