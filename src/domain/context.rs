//! Reporting filter context

use serde::Deserialize;

use crate::models::account;

/// The dashboard's active filter selection: a calendar period plus optional
/// talent and account choices. `month` is zero-indexed (0 = January).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportContext {
    pub month: u32,
    pub year: i32,
    #[serde(default)]
    pub talent_id: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
}

impl ReportContext {
    /// True when the record's ids satisfy every active selection. Absent
    /// selections always match.
    pub fn matches(&self, talent_id: &str, account_id: &str) -> bool {
        let talent_ok = self.talent_id.as_deref().is_none_or(|t| t == talent_id);
        let account_ok = self.account_id.as_deref().is_none_or(|a| a == account_id);
        talent_ok && account_ok
    }

    /// Canonicalizes the selection: empty strings count as "no choice", and
    /// the account choice depends on the talent choice - an account that
    /// does not belong to the selected talent is dropped.
    pub fn normalized(mut self, accounts: &[account::Model]) -> Self {
        if self.talent_id.as_deref() == Some("") {
            self.talent_id = None;
        }
        if self.account_id.as_deref() == Some("") {
            self.account_id = None;
        }
        if let (Some(talent_id), Some(account_id)) = (&self.talent_id, &self.account_id) {
            let owned = accounts
                .iter()
                .any(|a| a.id == *account_id && a.talent_id == *talent_id);
            if !owned {
                self.account_id = None;
            }
        }
        self
    }
}
