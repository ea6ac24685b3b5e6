//! Controls that sit around a list and drive its controller.

pub mod filter;
pub mod pagination;

pub use filter::{FilterChoice, FilterControl, FilterInputs, Section, is_sort_active, sort_field, sort_label};
pub use pagination::{PageLink, PageLinkKind, PaginationControl, PaginationView};
