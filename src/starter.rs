use crate::{import_document, Document, ImportError};

/// Bundled "server creation flow" diagram
pub const SERVER_CREATION_FLOW: &str = include_str!("../assets/server-creation-flow.json");

/// Parse the bundled starter diagram
pub fn server_creation_flow() -> Result<Document, ImportError> {
    import_document(SERVER_CREATION_FLOW)
}
