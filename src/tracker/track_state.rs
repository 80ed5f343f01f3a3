/// Lifecycle of one tracked object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectState {
    /// Classified and visible, no hand near it
    #[default]
    Detected,
    /// A hand is close enough to pick it up
    Approaching,
    /// Picked up and attributed to the user
    Carried,
    /// Confirmed into a matching bin
    Disposed,
    /// Tracking lost while carried
    Dropped,
}
