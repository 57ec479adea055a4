use crate::models::{Popup, Prize};

/// Popup to show after a confirmed winner, if any.
///
/// Only a commit that drove `drawn` to zero triggers a popup. When that was
/// the last prize with stock the all-finished popup wins and the stock
/// popup is suppressed.
pub fn popup_after_commit(drawn: &Prize, prizes: &[Prize]) -> Option<Popup> {
    if drawn.stock > 0 {
        return None;
    }
    if prizes.iter().all(|p| p.stock == 0) {
        return Some(Popup::Finished);
    }
    Some(Popup::StockFinished {
        prize_id: drawn.id.clone(),
        prize_name: drawn.name.clone(),
    })
}

/// Popup slot: at most one pending (delayed) or visible popup.
#[derive(Debug, Clone, Default)]
pub struct PopupSequencer {
    pending: Option<Popup>,
    visible: Option<Popup>,
}

impl PopupSequencer {
    /// Queue a popup; it becomes visible when its delay elapses
    pub fn schedule(&mut self, popup: Popup) {
        self.pending = Some(popup);
    }

    /// Promote the pending popup. Returns the popup now visible.
    pub fn reveal(&mut self) -> Option<&Popup> {
        if let Some(popup) = self.pending.take() {
            self.visible = Some(popup);
        }
        self.visible.as_ref()
    }

    pub fn dismiss(&mut self) -> Option<Popup> {
        self.visible.take()
    }

    pub fn clear(&mut self) {
        self.pending = None;
        self.visible = None;
    }

    pub fn visible(&self) -> Option<&Popup> {
        self.visible.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.pending.is_some() || self.visible.is_some()
    }
}
