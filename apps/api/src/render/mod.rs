// Document assembly: content tree to HTML page, optionally zipped with its JSON.
// Styling lives in the linked static assets.

pub mod bundle;
pub mod html;

pub use bundle::bundle_zip;
pub use html::render_html;
