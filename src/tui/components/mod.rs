//! # TUI Components
//!
//! UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Receive all data as struct fields each frame:
//! - `TitleBar`: app name, currency, last update, theme
//! - `SearchBox`: the filter field
//! - `DetailsView`: one coin's figures
//! - `StatusView`: loading spinner or error with retry hint
//!
//! ### Stateful Components (Event-Driven)
//!
//! Hold local state and emit events:
//! - `SearchInput`: turns keystrokes into `SearchChanged`
//! - `CryptoListState`: selection, emits `ListEvent::Open`
//!
//! Each component file keeps its state types, event types, rendering and
//! tests together.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── search_box.rs    (Filter input)
//! ├── crypto_list.rs   (Market list)
//! ├── details_view.rs  (Single coin)
//! └── status_view.rs   (Loading / error body)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod crypto_list;
pub mod details_view;
pub mod search_box;
pub mod status_view;
pub use crypto_list::{CryptoList, CryptoListState, ListEvent};
pub use details_view::DetailsView;
pub use search_box::{SearchBox, SearchChanged, SearchInput};
pub use status_view::{Status, StatusView};
