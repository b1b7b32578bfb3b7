// Upload form: file validation and the select/analyze state machine.
// All backend traffic goes through analysis_client.

pub mod file;
pub mod state;
pub mod view;

pub use file::SelectedFile;
pub use state::{FormError, UploadForm};
pub use view::FormView;
