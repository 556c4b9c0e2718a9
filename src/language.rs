use std::cell::{Cell, RefCell};

#[cfg(target_arch = "wasm32")]
pub const LANGUAGE_KEY: &str = "language";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    English,
    Chinese,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Chinese => "zh",
        }
    }

    pub fn from_code(value: &str) -> Option<Self> {
        match value {
            "en" => Some(Self::English),
            "zh" => Some(Self::Chinese),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::English => Self::Chinese,
            Self::Chinese => Self::English,
        }
    }

    pub fn attribute(self) -> &'static str {
        match self {
            Self::English => "data-en",
            Self::Chinese => "data-zh",
        }
    }

    pub fn pick<'a>(self, english: &'a str, chinese: &'a str) -> &'a str {
        match self {
            Self::English => english,
            Self::Chinese => chinese,
        }
    }

    // `display` for the `.lang-en` and `.lang-zh` indicator spans.
    pub fn indicator_display(self) -> (&'static str, &'static str) {
        match self {
            Self::English => ("inline", "none"),
            Self::Chinese => ("none", "inline"),
        }
    }
}

pub trait PreferenceStore {
    fn load(&self) -> Option<String>;
    fn save(&self, value: &str);
}

// Unavailable storage reads as nothing stored and drops writes.
#[cfg(target_arch = "wasm32")]
pub struct LocalStore {
    key: &'static str,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl PreferenceStore for LocalStore {
    fn load(&self) -> Option<String> {
        Self::storage()?.get_item(self.key).ok().flatten()
    }

    fn save(&self, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(self.key, value);
        }
    }
}

pub struct LanguagePreference<S> {
    store: S,
}

impl<S: PreferenceStore> LanguagePreference<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn get(&self) -> Language {
        self.store
            .load()
            .and_then(|value| Language::from_code(value.trim()))
            .unwrap_or_default()
    }

    pub fn set(&self, language: Language) {
        self.store.save(language.as_str());
    }
}

type LanguageListener = Box<dyn Fn(Language)>;

// Every change is written through to the store before listeners run.
pub struct LanguageService<S> {
    preference: LanguagePreference<S>,
    current: Cell<Language>,
    listeners: RefCell<Vec<LanguageListener>>,
}

impl<S: PreferenceStore> LanguageService<S> {
    pub fn new(store: S) -> Self {
        let preference = LanguagePreference::new(store);
        let current = Cell::new(preference.get());

        Self {
            preference,
            current,
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn current(&self) -> Language {
        self.current.get()
    }

    pub fn subscribe(&self, listener: impl Fn(Language) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    pub fn set(&self, language: Language) {
        self.current.set(language);
        self.preference.set(language);
        self.notify();
    }

    pub fn toggle(&self) -> Language {
        let next = self.current().toggled();
        self.set(next);
        next
    }

    pub fn notify(&self) {
        let language = self.current();
        for listener in self.listeners.borrow().iter() {
            listener(language);
        }
    }
}

#[cfg(test)]
pub(crate) struct MemoryStore {
    slot: std::rc::Rc<RefCell<Option<String>>>,
}

#[cfg(test)]
impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self {
            slot: std::rc::Rc::new(RefCell::new(None)),
        }
    }

    pub(crate) fn with_value(value: &str) -> Self {
        let store = Self::new();
        *store.slot.borrow_mut() = Some(value.to_string());
        store
    }

    /// Second handle onto the same slot, standing in for a page reload.
    pub(crate) fn reopen(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

#[cfg(test)]
impl PreferenceStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn save(&self, value: &str) {
        *self.slot.borrow_mut() = Some(value.to_string());
    }
}
