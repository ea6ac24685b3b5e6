//! Page links under a list.

use counterdesk_core::PageWindow;

use crate::list::{CollectionStore, FetchOutcome, ListError, ListQueryController, Notifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageLinkKind {
    Previous,
    Page,
    Next,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub kind: PageLinkKind,
    /// Target page; `None` when the link is disabled.
    pub page: Option<u64>,
    pub active: bool,
}

impl PageLink {
    pub fn is_disabled(&self) -> bool {
        self.page.is_none()
    }

    pub fn label(&self) -> String {
        match (self.kind, self.page) {
            (PageLinkKind::Previous, _) => "«".to_string(),
            (PageLinkKind::Next, _) => "»".to_string(),
            (PageLinkKind::Page, Some(page)) => page.to_string(),
            (PageLinkKind::Page, None) => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub previous: PageLink,
    pub pages: Vec<PageLink>,
    pub next: PageLink,
}

impl PaginationView {
    /// Links in display order.
    pub fn links(&self) -> impl Iterator<Item = &PageLink> {
        std::iter::once(&self.previous)
            .chain(self.pages.iter())
            .chain(std::iter::once(&self.next))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PaginationControl;

impl PaginationControl {
    /// Nothing is rendered when there is a single empty page.
    pub fn view(window: &PageWindow) -> Option<PaginationView> {
        if window.is_empty() {
            return None;
        }
        Some(PaginationView {
            previous: PageLink {
                kind: PageLinkKind::Previous,
                page: window.previous_page,
                active: false,
            },
            pages: window
                .page_numbers
                .iter()
                .map(|&page| PageLink {
                    kind: PageLinkKind::Page,
                    page: Some(page),
                    active: page == window.page,
                })
                .collect(),
            next: PageLink {
                kind: PageLinkKind::Next,
                page: window.next_page,
                active: false,
            },
        })
    }

    pub async fn click<S, N>(
        link: &PageLink,
        controller: &ListQueryController<S, N>,
    ) -> Result<FetchOutcome, ListError>
    where
        S: CollectionStore,
        N: Notifier,
    {
        match link.page {
            Some(page) => controller.paginate_data(page).await,
            None => Ok(FetchOutcome::Unchanged),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_hidden_when_empty() {
        assert!(PaginationControl::view(&PageWindow::derive(1, 10, 0, 5)).is_none());
    }

    #[test]
    fn test_view_marks_active_and_disabled() {
        let view = PaginationControl::view(&PageWindow::derive(1, 10, 35, 5)).unwrap();
        assert!(view.previous.is_disabled());
        assert_eq!(view.next.page, Some(2));
        let labels: Vec<_> = view.pages.iter().map(PageLink::label).collect();
        assert_eq!(labels, vec!["1", "2", "3", "4"]);
        assert!(view.pages[0].active);
        assert!(!view.pages[1].active);
        assert_eq!(view.links().count(), 6);
    }

    #[test]
    fn test_single_page_still_renders() {
        let view = PaginationControl::view(&PageWindow::derive(1, 10, 3, 5)).unwrap();
        assert_eq!(view.pages.len(), 1);
        assert!(view.previous.is_disabled());
        assert!(view.next.is_disabled());
    }
}
