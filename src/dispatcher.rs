//! Intent handlers: every user action is an [`Intent`] and every handler
//! re-derives what it shows from the record store.

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::config::Config;
use crate::currency::LocaleConfig;
use crate::domain::{RecordDraft, RecordId};
use crate::errors::{LedgerError, Result};
use crate::ledger::{FilterCriteria, RecordStore};
use crate::messaging::{MessageComposer, MISSING_INPUT_NOTICE};
use crate::render::{render, LedgerView};

pub const FILTERS_SHOWN_LABEL: &str = "Ocultar Filtros";
pub const FILTERS_HIDDEN_LABEL: &str = "Exibir Filtros";
pub const EXCEL_EXPORT_NOTICE: &str =
    "Funcionalidade de Exportar para Excel (XLSX) não implementada neste placeholder.";
pub const PDF_EXPORT_NOTICE: &str =
    "Funcionalidade de Exportar para PDF não implementada neste placeholder.";

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Submit(RecordDraft),
    Delete(RecordId),
    FilterChanged(FilterCriteria),
    ToggleFilters,
    QuickMessage(usize),
    SetPhone(String),
    SetMessage(String),
    Send,
    ExportExcel,
    DownloadPdf,
    ToggleMenu,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The ledger was re-rendered.
    Rendered(LedgerView),
    FiltersToggled { visible: bool, label: &'static str },
    MenuToggled { open: bool },
    ComposerUpdated(MessageComposer),
    /// Open this URL in a new browsing context.
    OpenLink(String),
    /// Blocking notice for the user; no state changed.
    Notice(String),
}

/// Entry form state that survives between submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormState {
    pub date: NaiveDate,
}

impl FormState {
    pub fn new(today: NaiveDate) -> Self {
        Self { date: today }
    }

    pub fn reset(&mut self, today: NaiveDate) {
        self.date = today;
    }
}

pub fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

pub struct Dispatcher {
    store: RecordStore,
    criteria: FilterCriteria,
    locale: LocaleConfig,
    quick_messages: Vec<String>,
    composer: MessageComposer,
    form: FormState,
    filters_visible: bool,
    menu_open: bool,
    today: fn() -> NaiveDate,
}

impl Dispatcher {
    pub fn new(store: RecordStore, config: &Config) -> Self {
        Self::with_today(store, config, utc_today)
    }

    /// Uses `today` wherever the current date is needed.
    pub fn with_today(store: RecordStore, config: &Config, today: fn() -> NaiveDate) -> Self {
        Self {
            store,
            criteria: FilterCriteria::default(),
            locale: LocaleConfig::pt_br(),
            quick_messages: config.quick_messages.clone(),
            composer: MessageComposer::default(),
            form: FormState::new(today()),
            filters_visible: true,
            menu_open: false,
            today,
        }
    }

    pub fn dispatch(&mut self, intent: Intent) -> Result<Outcome> {
        match intent {
            // The store undoes a mutation it could not persist, so an error
            // here leaves the last rendered view accurate.
            Intent::Submit(draft) => {
                self.store.add(draft)?;
                self.form.reset((self.today)());
                Ok(Outcome::Rendered(self.view()))
            }
            Intent::Delete(id) => {
                self.store.remove(id)?;
                Ok(Outcome::Rendered(self.view()))
            }
            Intent::FilterChanged(criteria) => {
                self.criteria = criteria;
                Ok(Outcome::Rendered(self.view()))
            }
            Intent::ToggleFilters => {
                self.filters_visible = !self.filters_visible;
                Ok(Outcome::FiltersToggled {
                    visible: self.filters_visible,
                    label: self.filters_label(),
                })
            }
            Intent::QuickMessage(index) => {
                let template = self.quick_messages.get(index).ok_or_else(|| {
                    LedgerError::InvalidInput(format!("mensagem rápida #{} não existe", index + 1))
                })?;
                self.composer.use_template(template);
                Ok(Outcome::ComposerUpdated(self.composer.clone()))
            }
            Intent::SetPhone(phone) => {
                self.composer.phone = phone;
                Ok(Outcome::ComposerUpdated(self.composer.clone()))
            }
            Intent::SetMessage(message) => {
                self.composer.message = message;
                Ok(Outcome::ComposerUpdated(self.composer.clone()))
            }
            Intent::Send => match self.composer.link() {
                Ok(url) => {
                    info!("whatsapp link composed");
                    Ok(Outcome::OpenLink(url))
                }
                Err(LedgerError::InvalidInput(_)) => {
                    Ok(Outcome::Notice(MISSING_INPUT_NOTICE.to_string()))
                }
                Err(err) => Err(err),
            },
            Intent::ExportExcel => Ok(Outcome::Notice(EXCEL_EXPORT_NOTICE.to_string())),
            Intent::DownloadPdf => Ok(Outcome::Notice(PDF_EXPORT_NOTICE.to_string())),
            Intent::ToggleMenu => {
                self.menu_open = !self.menu_open;
                Ok(Outcome::MenuToggled {
                    open: self.menu_open,
                })
            }
        }
    }

    /// Renders the store under the current criteria.
    pub fn view(&self) -> LedgerView {
        render(self.store.all(), &self.criteria, &self.locale)
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn composer(&self) -> &MessageComposer {
        &self.composer
    }

    pub fn form(&self) -> FormState {
        self.form
    }

    pub fn quick_messages(&self) -> &[String] {
        &self.quick_messages
    }

    pub fn filters_label(&self) -> &'static str {
        if self.filters_visible {
            FILTERS_SHOWN_LABEL
        } else {
            FILTERS_HIDDEN_LABEL
        }
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::STORAGE_KEY;
    use crate::render::EMPTY_PLACEHOLDER;
    use crate::storage::MemoryStore;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 14).unwrap()
    }

    fn dispatcher() -> Dispatcher {
        let store = RecordStore::load(Box::new(MemoryStore::new()));
        Dispatcher::with_today(store, &Config::default(), fixed_today)
    }

    fn draft(driver: &str, amount: f64, received: f64) -> RecordDraft {
        RecordDraft {
            driver: driver.into(),
            store: "Centro".into(),
            amount,
            received,
            weight: 5.0,
            nfs: 2,
            date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        }
    }

    fn rendered(outcome: Outcome) -> LedgerView {
        match outcome {
            Outcome::Rendered(view) => view,
            other => panic!("expected a render, got {other:?}"),
        }
    }

    #[test]
    fn submit_adds_renders_and_resets_date() {
        let mut dispatcher = dispatcher();
        let view = rendered(
            dispatcher
                .dispatch(Intent::Submit(draft("Ana", 10.0, 15.0)))
                .unwrap(),
        );
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.totals.profit, "5,00");
        assert_eq!(dispatcher.form().date, fixed_today());
        assert!(dispatcher
            .store()
            .backend()
            .get(STORAGE_KEY)
            .unwrap()
            .is_some());
    }

    struct FullDisk;

    impl crate::storage::KeyValueStore for FullDisk {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(LedgerError::Storage("disk full".into()))
        }
    }

    #[test]
    fn failed_submit_leaves_view_unchanged() {
        let store = RecordStore::load(Box::new(FullDisk));
        let mut dispatcher = Dispatcher::with_today(store, &Config::default(), fixed_today);
        assert!(matches!(
            dispatcher.dispatch(Intent::Submit(draft("Ana", 10.0, 15.0))),
            Err(LedgerError::Storage(_))
        ));
        assert!(dispatcher.view().rows.is_empty());
    }

    #[test]
    fn delete_through_row_handle() {
        let mut dispatcher = dispatcher();
        let view = rendered(
            dispatcher
                .dispatch(Intent::Submit(draft("Ana", 10.0, 15.0)))
                .unwrap(),
        );
        let handle = view.rows[0].delete;
        let view = rendered(dispatcher.dispatch(handle.intent()).unwrap());
        assert_eq!(view.placeholder, Some(EMPTY_PLACEHOLDER));
    }

    #[test]
    fn filter_change_rerenders_subset() {
        let mut dispatcher = dispatcher();
        dispatcher
            .dispatch(Intent::Submit(draft("Ana", 10.0, 15.0)))
            .unwrap();
        dispatcher
            .dispatch(Intent::Submit(draft("Bruno", 20.0, 18.0)))
            .unwrap();
        let view = rendered(
            dispatcher
                .dispatch(Intent::FilterChanged(FilterCriteria {
                    driver: Some("Bruno".into()),
                    ..FilterCriteria::default()
                }))
                .unwrap(),
        );
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.totals.profit, "-2,00");
    }

    #[test]
    fn toggle_filters_flips_label() {
        let mut dispatcher = dispatcher();
        assert_eq!(
            dispatcher.dispatch(Intent::ToggleFilters).unwrap(),
            Outcome::FiltersToggled {
                visible: false,
                label: FILTERS_HIDDEN_LABEL
            }
        );
        assert_eq!(
            dispatcher.dispatch(Intent::ToggleFilters).unwrap(),
            Outcome::FiltersToggled {
                visible: true,
                label: FILTERS_SHOWN_LABEL
            }
        );
    }

    #[test]
    fn send_without_input_is_a_notice() {
        let mut dispatcher = dispatcher();
        dispatcher
            .dispatch(Intent::SetMessage("oi".into()))
            .unwrap();
        assert_eq!(
            dispatcher.dispatch(Intent::Send).unwrap(),
            Outcome::Notice(MISSING_INPUT_NOTICE.to_string())
        );
        assert_eq!(dispatcher.composer().message, "oi");
    }

    #[test]
    fn quick_message_then_send_opens_link() {
        let mut dispatcher = dispatcher();
        dispatcher
            .dispatch(Intent::SetPhone("(11) 91234-5678".into()))
            .unwrap();
        dispatcher.dispatch(Intent::QuickMessage(0)).unwrap();
        assert_eq!(
            dispatcher.composer().message,
            Config::default().quick_messages[0]
        );
        match dispatcher.dispatch(Intent::Send).unwrap() {
            Outcome::OpenLink(url) => assert!(url.contains("phone=5511912345678&text=")),
            other => panic!("expected a link, got {other:?}"),
        }
    }

    #[test]
    fn unknown_quick_message_is_invalid_input() {
        let mut dispatcher = dispatcher();
        assert!(matches!(
            dispatcher.dispatch(Intent::QuickMessage(42)),
            Err(LedgerError::InvalidInput(_))
        ));
    }

    #[test]
    fn exports_are_placeholders() {
        let mut dispatcher = dispatcher();
        assert_eq!(
            dispatcher.dispatch(Intent::ExportExcel).unwrap(),
            Outcome::Notice(EXCEL_EXPORT_NOTICE.to_string())
        );
        assert_eq!(
            dispatcher.dispatch(Intent::DownloadPdf).unwrap(),
            Outcome::Notice(PDF_EXPORT_NOTICE.to_string())
        );
    }

    #[test]
    fn menu_toggle_flips() {
        let mut dispatcher = dispatcher();
        assert_eq!(
            dispatcher.dispatch(Intent::ToggleMenu).unwrap(),
            Outcome::MenuToggled { open: true }
        );
        assert!(dispatcher.menu_open());
    }
}
