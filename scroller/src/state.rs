use alloc::string::String;

/// A lightweight snapshot of the state the presentation layer cares about.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    /// `true` once the list is scrolled away from its top rest position. Typically drives a
    /// "scroll to top" affordance.
    pub scrolled_from_top: bool,
    /// The header label derived from the currently anchored item, when a `header_label` hook
    /// is configured.
    pub header_label: Option<String>,
    /// `true` when end-of-content was reached with zero items; pair with the configured
    /// empty-state message.
    pub empty: bool,
}
