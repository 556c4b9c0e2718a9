use crate::config::{EducationMedia, MediaAsset, SiteConfig};
use crate::entries::{summary_item, EducationEntry, EntryKind, TimelineEntry};
use crate::error::Result;
use crate::language::Language;
use crate::markup::MarkupNode;

const CALENDAR_ICON: &str = "fas fa-calendar";
const LOCATION_ICON: &str = "fas fa-map-marker-alt";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetaItem {
    pub icon: &'static str,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailSection {
    pub heading: String,
    pub lines: Vec<String>,
    pub images: Vec<MediaAsset>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailView {
    pub kind: EntryKind,
    pub title: String,
    pub subtitle: String,
    pub meta: Vec<MetaItem>,
    pub logo: Option<MediaAsset>,
    pub sections: Vec<DetailSection>,
}

fn meta_row(date: &str, location: Option<&str>) -> Vec<MetaItem> {
    let mut meta = vec![MetaItem {
        icon: CALENDAR_ICON,
        text: date.to_string(),
    }];

    if let Some(location) = location {
        meta.push(MetaItem {
            icon: LOCATION_ICON,
            text: location.to_string(),
        });
    }

    meta
}

impl DetailView {
    pub fn experience(entry: &TimelineEntry) -> Self {
        Self {
            kind: EntryKind::Experience,
            title: entry.title.clone(),
            subtitle: entry.company.clone(),
            meta: meta_row(&entry.date, entry.location.as_deref()),
            logo: None,
            sections: vec![DetailSection {
                heading: "Key Responsibilities".to_string(),
                lines: entry.responsibilities.clone(),
                images: Vec::new(),
            }],
        }
    }

    pub fn education(entry: &EducationEntry, language: Language, media: Option<&EducationMedia>) -> Self {
        let mut sections = vec![DetailSection {
            heading: language.pick("Key Courses", "重點課程").to_string(),
            lines: entry.courses.clone(),
            images: Vec::new(),
        }];

        if let Some(photos) = media.map(|media| &media.photos).filter(|photos| !photos.is_empty()) {
            sections.push(DetailSection {
                heading: language.pick("Graduation Photo", "畢業照片").to_string(),
                lines: Vec::new(),
                images: photos.clone(),
            });
        }

        Self {
            kind: EntryKind::Education,
            title: entry.school.clone(),
            subtitle: entry.degree.clone(),
            meta: meta_row(&entry.date, entry.location.as_deref()),
            logo: media.and_then(|media| media.logo.clone()),
            sections,
        }
    }
}

pub fn load_detail<N: MarkupNode>(
    root: &N,
    kind: EntryKind,
    index: usize,
    language: Language,
    config: &SiteConfig,
) -> Result<DetailView> {
    let item = summary_item(root, kind, index)?;

    match kind {
        EntryKind::Experience => TimelineEntry::extract(&item).map(|entry| DetailView::experience(&entry)),
        EntryKind::Education => EducationEntry::extract(&item, language).map(|entry| {
            let media = config.media_for(entry.key.as_deref());
            DetailView::education(&entry, language, media)
        }),
    }
}

pub fn scrollbar_width(inner_width: f64, client_width: f64) -> f64 {
    (inner_width - client_width).max(0.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollLock {
    pub scrollbar_width: f64,
}

impl ScrollLock {
    pub fn css_value(self) -> String {
        format!("{}px", self.scrollbar_width)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageChrome {
    pub scrollbar_width: Option<String>,
    pub body_modal_open: bool,
}

impl PageChrome {
    pub fn for_lock(lock: Option<ScrollLock>) -> Self {
        Self {
            scrollbar_width: lock.map(ScrollLock::css_value),
            body_modal_open: lock.is_some(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct ActiveModal {
    view: DetailView,
    lock: ScrollLock,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ModalAction {
    Open { view: DetailView, scrollbar_width: f64 },
    Dismiss(EntryKind),
    Close,
}

// At most one modal is active across both kinds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModalState {
    active: Option<ActiveModal>,
}

impl ModalState {
    pub fn apply(&self, action: ModalAction) -> Self {
        match action {
            ModalAction::Open {
                view,
                scrollbar_width,
            } => Self {
                active: Some(ActiveModal {
                    view,
                    lock: ScrollLock { scrollbar_width },
                }),
            },
            ModalAction::Dismiss(kind) if self.is_active(kind) => Self::default(),
            ModalAction::Dismiss(_) => self.clone(),
            ModalAction::Close => Self::default(),
        }
    }

    pub fn active_kind(&self) -> Option<EntryKind> {
        self.active.as_ref().map(|active| active.view.kind)
    }

    pub fn is_active(&self, kind: EntryKind) -> bool {
        self.active_kind() == Some(kind)
    }

    pub fn view(&self, kind: EntryKind) -> Option<&DetailView> {
        self.active
            .as_ref()
            .map(|active| &active.view)
            .filter(|view| view.kind == kind)
    }

    pub fn scroll_lock(&self) -> Option<ScrollLock> {
        self.active.as_ref().map(|active| active.lock)
    }

    pub fn page_chrome(&self) -> PageChrome {
        PageChrome::for_lock(self.scroll_lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entries::tests::PAGE;
    use crate::error::SiteError;
    use scraper::Html;

    fn load(kind: EntryKind, index: usize, language: Language) -> Result<DetailView> {
        let document = Html::parse_document(PAGE);
        load_detail(&document.root_element(), kind, index, language, &SiteConfig::default())
    }

    #[test]
    fn experience_open_and_close_round_trip() {
        let view = load(EntryKind::Experience, 0, Language::English).expect("view");
        assert_eq!(view.title, "Engineer");
        assert_eq!(view.subtitle, "Acme");
        assert_eq!(view.meta.len(), 1);
        assert_eq!(view.meta[0].text, "2020–2021");
        assert_eq!(view.sections[0].heading, "Key Responsibilities");
        assert_eq!(
            view.sections[0].lines,
            vec!["Built the billing pipeline", "Mentored two interns"]
        );

        let opened = ModalState::default().apply(ModalAction::Open {
            view,
            scrollbar_width: 15.0,
        });
        assert!(opened.is_active(EntryKind::Experience));
        assert_eq!(opened.scroll_lock().map(ScrollLock::css_value).as_deref(), Some("15px"));

        let closed = opened.apply(ModalAction::Close);
        assert!(!closed.is_active(EntryKind::Experience));
        assert_eq!(closed.scroll_lock(), None);
    }

    #[test]
    fn location_adds_a_second_meta_item() {
        let view = load(EntryKind::Experience, 1, Language::English).expect("view");

        assert_eq!(view.meta.len(), 2);
        assert_eq!(view.meta[1].icon, LOCATION_ICON);
        assert_eq!(view.meta[1].text, "Taipei");
    }

    #[test]
    fn education_view_is_localized_with_configured_media() {
        let view = load(EntryKind::Education, 0, Language::Chinese).expect("view");

        assert_eq!(view.subtitle, "資訊工程學士");
        assert_eq!(view.sections[0].heading, "重點課程");
        assert_eq!(view.sections[0].lines, vec!["作業系統", "編譯器"]);
        assert_eq!(view.logo.as_ref().map(|logo| logo.alt.as_str()), Some("NSYSU Logo"));
        assert_eq!(view.sections[1].heading, "畢業照片");
        assert_eq!(view.sections[1].images.len(), 1);
    }

    #[test]
    fn education_without_media_key_renders_no_media() {
        let entry = EducationEntry {
            school: "University of Florida".to_string(),
            degree: "M.S.".to_string(),
            date: "2019".to_string(),
            location: None,
            courses: vec!["Algorithms".to_string()],
            key: None,
        };
        let config = SiteConfig::default();

        let view = DetailView::education(&entry, Language::English, config.media_for(entry.key.as_deref()));

        assert_eq!(view.logo, None);
        assert_eq!(view.sections.len(), 1);
        assert_eq!(view.sections[0].heading, "Key Courses");
    }

    #[test]
    fn invalid_index_is_an_error_not_a_modal() {
        let error = load(EntryKind::Education, 9, Language::English).expect_err("missing entry");

        assert!(matches!(error, SiteError::EntryNotFound { index: 9, .. }));
    }

    #[test]
    fn opening_one_kind_replaces_the_other() {
        let experience = load(EntryKind::Experience, 0, Language::English).expect("view");
        let education = load(EntryKind::Education, 0, Language::English).expect("view");

        let state = ModalState::default()
            .apply(ModalAction::Open {
                view: experience,
                scrollbar_width: 0.0,
            })
            .apply(ModalAction::Open {
                view: education,
                scrollbar_width: 0.0,
            });

        assert!(state.is_active(EntryKind::Education));
        assert!(!state.is_active(EntryKind::Experience));
        assert!(state.view(EntryKind::Experience).is_none());
    }

    #[test]
    fn dismiss_only_closes_the_matching_kind() {
        let view = load(EntryKind::Experience, 0, Language::English).expect("view");
        let open = ModalState::default().apply(ModalAction::Open {
            view,
            scrollbar_width: 12.0,
        });

        let untouched = open.apply(ModalAction::Dismiss(EntryKind::Education));
        assert_eq!(untouched, open);

        let dismissed = open.apply(ModalAction::Dismiss(EntryKind::Experience));
        assert_eq!(dismissed.active_kind(), None);
    }

    #[test]
    fn closing_removes_scrollbar_variable_and_body_class() {
        let view = load(EntryKind::Education, 0, Language::English).expect("view");
        let open = ModalState::default().apply(ModalAction::Open {
            view,
            scrollbar_width: 17.0,
        });

        assert_eq!(
            open.page_chrome(),
            PageChrome {
                scrollbar_width: Some("17px".to_string()),
                body_modal_open: true,
            }
        );

        let closed = open.apply(ModalAction::Close);
        assert_eq!(
            closed.page_chrome(),
            PageChrome {
                scrollbar_width: None,
                body_modal_open: false,
            }
        );
    }

    #[test]
    fn closing_with_nothing_open_leaves_state_equal() {
        let idle = ModalState::default();

        assert_eq!(idle.apply(ModalAction::Close), idle);
        assert_eq!(idle.apply(ModalAction::Dismiss(EntryKind::Experience)), idle);
    }

    #[test]
    fn scrollbar_width_never_negative() {
        assert_eq!(scrollbar_width(1280.0, 1265.0), 15.0);
        assert_eq!(scrollbar_width(1280.0, 1280.0), 0.0);
        assert_eq!(scrollbar_width(1000.0, 1010.0), 0.0);
    }
}
