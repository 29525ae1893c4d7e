//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: top status bar
//! - `Sidebar`: section picker
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputBox`: single or multi-line text field
//! - `CreateForm`: the new-post form, built from `InputBox`es
//!
//! ### Transient Wrappers
//!
//! Created each frame around state owned by `TuiState`:
//! - `PostList`: selectable filenames (`ListState`)
//! - `PostView`: scrollable post document (scroll offset)
//!
//! Components receive external data as props, never by reaching into `App`
//! directly.
//!
//! ```text
//! components/
//! ├── mod.rs          (this file)
//! ├── title_bar.rs
//! ├── sidebar.rs
//! ├── input_box.rs
//! ├── create_form.rs
//! ├── post_list.rs
//! └── post_view.rs
//! ```

pub mod create_form;
pub mod input_box;
pub mod post_list;
pub mod post_view;
pub mod sidebar;
mod title_bar;

pub use create_form::{CreateForm, FormEvent};
pub use input_box::{InputBox, InputEvent};
pub use post_list::PostList;
pub use post_view::PostView;
pub use sidebar::Sidebar;
pub use title_bar::TitleBar;
