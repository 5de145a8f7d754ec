/// Recoverable rendering problem.
///
/// Render errors never abort a page: the offending node is skipped and the
/// error is reported alongside the output.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// Content tree contained a node kind this renderer does not know.
    #[error("Unknown content node at {path}")]
    UnknownNode {
        /// Child indices from the root, e.g. `3.1` for the second child of the fourth node.
        path: String,
    },
}
