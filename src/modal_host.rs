use gloo::events::EventListener;
use serde_json::json;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, KeyboardEvent, MouseEvent};
use yew::prelude::*;

use crate::entries::EntryKind;
use crate::error::{Result, SiteError};
use crate::frontend::SiteContext;
use crate::markup::MarkupNode;
use crate::modal::{
    load_detail, scrollbar_width, DetailSection, DetailView, ModalAction, ModalState, PageChrome,
};

const SCROLLBAR_WIDTH_PROPERTY: &str = "--scrollbar-width";
const BODY_MODAL_OPEN_CLASS: &str = "modal-open";
const MODAL_ACTIVE_CLASS: &str = "active";
const MODAL_ROOT_ID: &str = "modal-root";

fn modal_id(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Experience => "experienceModal",
        EntryKind::Education => "educationModal",
    }
}

impl Reducible for ModalState {
    type Action = ModalAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}

struct ModalSlots {
    close: &'static str,
    title: &'static str,
    subtitle: &'static str,
    meta: &'static str,
    body: &'static str,
}

fn slots(kind: EntryKind) -> ModalSlots {
    match kind {
        EntryKind::Experience => ModalSlots {
            close: "modalCloseBtn",
            title: "modalTitle",
            subtitle: "modalCompany",
            meta: "modalMeta",
            body: "modalBody",
        },
        EntryKind::Education => ModalSlots {
            close: "eduModalCloseBtn",
            title: "eduModalTitle",
            subtitle: "eduModalDegree",
            meta: "eduModalMeta",
            body: "eduModalBody",
        },
    }
}

fn measure_scrollbar(context: &SiteContext) -> f64 {
    let inner_width = context
        .window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    let client_width = context
        .document
        .document_element()
        .map(|root| f64::from(root.client_width()))
        .unwrap_or(inner_width);

    scrollbar_width(inner_width, client_width)
}

fn open_detail(context: &SiteContext, state: &UseReducerHandle<ModalState>, kind: EntryKind, index: usize) {
    let language = context.language.current();
    let loaded = context
        .root()
        .and_then(|root| load_detail(&root, kind, index, language, &context.config));

    match loaded {
        Ok(view) => state.dispatch(ModalAction::Open {
            view,
            scrollbar_width: measure_scrollbar(context),
        }),
        Err(error) => {
            context.logger.warn(
                "modal.open_failed",
                json!({ "kind": kind.as_str(), "index": index, "error": error.to_string() }),
            );
        }
    }
}

fn attach_triggers(context: &SiteContext, state: &UseReducerHandle<ModalState>) -> Result<Vec<EventListener>> {
    let mut listeners = Vec::new();
    let root = context.root()?;

    for kind in EntryKind::ALL {
        for (index, item) in root.select_all(kind.item_selector()).into_iter().enumerate() {
            let context = context.clone();
            let state = state.clone();
            listeners.push(EventListener::new(&item, "click", move |_| {
                open_detail(&context, &state, kind, index);
            }));
        }
    }

    let state = state.clone();
    listeners.push(EventListener::new(&context.document, "keydown", move |event| {
        let is_escape = event
            .dyn_ref::<KeyboardEvent>()
            .is_some_and(|event| event.key() == "Escape");
        if is_escape {
            state.dispatch(ModalAction::Close);
        }
    }));

    Ok(listeners)
}

fn sync_page_chrome(document: &Document, chrome: &PageChrome) {
    if let Some(root) = document
        .document_element()
        .and_then(|root| root.dyn_into::<HtmlElement>().ok())
    {
        let style = root.style();
        let _ = match chrome.scrollbar_width.as_deref() {
            Some(width) => style.set_property(SCROLLBAR_WIDTH_PROPERTY, width),
            None => style.remove_property(SCROLLBAR_WIDTH_PROPERTY).map(drop),
        };
    }

    if let Some(body) = document.body() {
        let _ = body
            .class_list()
            .toggle_with_force(BODY_MODAL_OPEN_CLASS, chrome.body_modal_open);
    }
}

fn render_section(section: &DetailSection) -> Html {
    html! {
        <div class="modal-section">
            <h3>{ section.heading.clone() }</h3>
            if !section.lines.is_empty() {
                <ul>
                    { for section.lines.iter().map(|line| html! { <li>{ line.clone() }</li> }) }
                </ul>
            }
            if !section.images.is_empty() {
                <div class="modal-images">
                    { for section.images.iter().map(|image| html! {
                        <img src={image.src.clone()} alt={image.alt.clone()} class="modal-image graduation" />
                    }) }
                </div>
            }
        </div>
    }
}

fn render_header(view: &DetailView, slots: &ModalSlots) -> Html {
    html! {
        <>
            <h2 class="modal-title" id={slots.title}>{ view.title.clone() }</h2>
            <p class="modal-subtitle" id={slots.subtitle}>{ view.subtitle.clone() }</p>
            <div class="modal-meta" id={slots.meta}>
                { for view.meta.iter().map(|item| html! {
                    <div class="modal-meta-item">
                        <i class={item.icon}></i>
                        <span>{ item.text.clone() }</span>
                    </div>
                }) }
            </div>
            if let Some(logo) = view.logo.as_ref() {
                <img src={logo.src.clone()} alt={logo.alt.clone()} class="modal-header-logo" />
            }
        </>
    }
}

#[derive(Properties, PartialEq)]
struct DetailModalProps {
    kind: EntryKind,
    view: Option<DetailView>,
    on_dismiss: Callback<EntryKind>,
}

#[function_component(DetailModal)]
fn detail_modal(props: &DetailModalProps) -> Html {
    let overlay = use_node_ref();
    let kind = props.kind;
    let slots = slots(kind);

    let on_backdrop = {
        let overlay = overlay.clone();
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |event: MouseEvent| {
            let target = event.target().map(JsValue::from);
            if target.is_some() && target == overlay.get().map(JsValue::from) {
                on_dismiss.emit(kind);
            }
        })
    };

    let on_close = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(kind))
    };

    html! {
        <div
            id={modal_id(kind)}
            class={classes!("modal", props.view.is_some().then_some(MODAL_ACTIVE_CLASS))}
            ref={overlay}
            onclick={on_backdrop}
        >
            <div class="modal-content">
                <div class="modal-header">
                    <button class="modal-close" id={slots.close} type="button" aria-label="Close" onclick={on_close}>
                        <i class="fas fa-times"></i>
                    </button>
                    if let Some(view) = props.view.as_ref() {
                        { render_header(view, &slots) }
                    }
                </div>
                <div class="modal-body" id={slots.body}>
                    if let Some(view) = props.view.as_ref() {
                        { for view.sections.iter().map(render_section) }
                    }
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ModalHostProps {
    pub context: SiteContext,
}

#[function_component(ModalHost)]
fn modal_host(props: &ModalHostProps) -> Html {
    let state = use_reducer_eq(ModalState::default);
    let previous_kind = use_mut_ref(|| None::<EntryKind>);

    {
        let context = props.context.clone();
        let state = state.clone();
        use_effect_with((), move |_| {
            let listeners = match attach_triggers(&context, &state) {
                Ok(listeners) => listeners,
                Err(error) => {
                    context
                        .logger
                        .warn("component.failed", json!({ "component": "modal_triggers", "error": error.to_string() }));
                    Vec::new()
                }
            };
            move || drop(listeners)
        });
    }

    {
        let document = props.context.document.clone();
        let logger = props.context.logger;
        use_effect_with((state.active_kind(), state.page_chrome()), move |(kind, chrome)| {
            sync_page_chrome(&document, chrome);

            let before = previous_kind.replace(*kind);
            match (before, *kind) {
                (_, Some(opened)) if before != Some(opened) => {
                    logger.debug("modal.opened", json!({ "kind": opened.as_str() }));
                }
                (Some(closed), None) => {
                    logger.debug("modal.closed", json!({ "kind": closed.as_str() }));
                }
                _ => {}
            }
            || ()
        });
    }

    let on_dismiss = {
        let state = state.clone();
        Callback::from(move |kind: EntryKind| state.dispatch(ModalAction::Dismiss(kind)))
    };

    html! {
        <>
            { for EntryKind::ALL.iter().map(|kind| html! {
                <DetailModal
                    kind={*kind}
                    view={state.view(*kind).cloned()}
                    on_dismiss={on_dismiss.clone()}
                />
            }) }
        </>
    }
}

pub fn mount(context: &SiteContext) -> Result<()> {
    let body = context.body()?;
    let container = context.document.create_element("div")?;
    container.set_id(MODAL_ROOT_ID);
    body.append_child(&container)
        .map_err(|_| SiteError::Dom(format!("could not attach #{MODAL_ROOT_ID}")))?;

    yew::Renderer::<ModalHost>::with_root_and_props(
        container,
        ModalHostProps {
            context: context.clone(),
        },
    )
    .render();

    Ok(())
}
