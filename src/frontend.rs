use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use serde_json::json;
use std::{cell::RefCell, f64::consts::TAU, rc::Rc};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, CanvasRenderingContext2d, Document, Element, HtmlCanvasElement,
    HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    KeyboardEvent, Node, PageTransitionEvent, ScrollBehavior, ScrollToOptions, Window,
};

use crate::config::{typing_texts, SiteConfig};
use crate::easter_egg::KeySequenceBuffer;
use crate::error::{Result, SiteError};
use crate::language::{Language, LanguageService, LocalStore, LANGUAGE_KEY};
use crate::lifecycle::{Cancel, LoopHandle};
use crate::log::{Logger, DEFAULT_LOG_LEVEL};
use crate::markup::{bilingual_text_plan, MarkupNode};
use crate::modal_host;
use crate::particles::ParticleField;
use crate::projects::{click_navigates, ProjectRouter};
use crate::reveal::{Reveal, RevealStyle};
use crate::scroll::{
    active_section, anchor_target, nav_link_states, navbar_shadow, smooth_scroll_top, SectionBounds,
};
use crate::typing::TypingEngine;

const CONFIG_ELEMENT_ID: &str = "site-config";

const ACTIVE_LINK_CLASS: &str = "active";
const ACTIVE_LINK_STYLE: &str = "
    .nav-menu a.active {
        color: var(--primary-color);
    }
    .nav-menu a.active::after {
        width: 100%;
    }
";

const REVEAL_SELECTOR: &str = ".education-item, .timeline-item, .project-card, .skill-category, .contact-item";
const REVEAL_THRESHOLD: f64 = 0.1;
const REVEAL_ROOT_MARGIN: &str = "0px 0px -100px 0px";
const REVEAL_TRANSITION: &str = "opacity 0.6s ease, transform 0.6s ease";

const PARTICLE_FILL: &str = "rgba(255, 255, 255, 0.5)";

const PROJECT_CARD_SELECTOR: &str = ".project-card";
const INTERACTIVE_SELECTOR: &str = "a, button";

const SPIN_TRANSFORM: &str = "rotate(360deg)";
const REST_TRANSFORM: &str = "rotate(0deg)";
const SPIN_TRANSITION: &str = "transform 2s";
const SPIN_DURATION_MS: u32 = 2_000;

thread_local! {
    static SITE: RefCell<Vec<Box<dyn Cancel>>> = const { RefCell::new(Vec::new()) };
}

#[derive(Clone)]
pub struct SiteContext {
    pub window: Window,
    pub document: Document,
    pub config: Rc<SiteConfig>,
    pub language: Rc<LanguageService<LocalStore>>,
    pub logger: Logger,
}

impl PartialEq for SiteContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.config, &other.config) && Rc::ptr_eq(&self.language, &other.language)
    }
}

impl SiteContext {
    pub fn root(&self) -> Result<Element> {
        self.document
            .document_element()
            .ok_or_else(|| SiteError::MissingElement("html".to_string()))
    }

    pub fn body(&self) -> Result<HtmlElement> {
        self.document
            .body()
            .ok_or_else(|| SiteError::MissingElement("body".to_string()))
    }
}

fn set_style(element: &Element, property: &str, value: &str) -> Result<()> {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        element.style().set_property(property, value)?;
    }
    Ok(())
}

fn load_config(document: &Document) -> SiteConfig {
    let Some(raw) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .map(|element| element.text_content())
    else {
        return SiteConfig::default();
    };

    SiteConfig::from_json(&raw).unwrap_or_else(|error| {
        Logger::new(DEFAULT_LOG_LEVEL).warn("config.invalid", json!({ "error": error.to_string() }));
        SiteConfig::default()
    })
}

pub fn run() {
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };

    if document.ready_state() != "loading" {
        start();
        return;
    }

    EventListener::once(&document, "DOMContentLoaded", |_| start()).forget();
}

fn start() {
    let Some(window) = window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let config = load_config(&document);
    let context = SiteContext {
        logger: Logger::new(config.log_level),
        language: Rc::new(LanguageService::new(LocalStore::new(LANGUAGE_KEY))),
        config: Rc::new(config),
        window,
        document,
    };

    let mut started = Vec::new();
    let mut failed = Vec::new();
    let mut record = |name: &'static str, outcome: Result<()>| match outcome {
        Ok(()) => started.push(name),
        Err(error) => {
            context
                .logger
                .warn("component.failed", json!({ "component": name, "error": error.to_string() }));
            failed.push(name);
        }
    };

    record("language", init_language(&context));
    record("smooth_scroll", init_smooth_scroll(&context));
    record("active_link_style", inject_active_link_style(&context.document));
    record("scroll_reactor", init_scroll_reactor(&context));
    record("reveal", init_reveal(&context));
    record("typing", init_typing(&context));
    record("particles", init_particles(&context));
    record("modals", modal_host::mount(&context));
    record("projects", init_projects(&context));
    record("easter_egg", init_easter_egg(&context));
    record("teardown", init_teardown(&context));

    context
        .logger
        .info("site.ready", json!({ "started": started, "failed": failed }));
}

fn remember(handle: impl Cancel + 'static) {
    SITE.with(|site| site.borrow_mut().push(Box::new(handle)));
}

fn init_teardown(context: &SiteContext) -> Result<()> {
    EventListener::new(&context.window, "pagehide", |event| {
        let persisted = event
            .dyn_ref::<PageTransitionEvent>()
            .is_some_and(PageTransitionEvent::persisted);
        if persisted {
            return;
        }

        SITE.with(|site| {
            for handle in site.borrow_mut().drain(..) {
                handle.cancel();
            }
        });
    })
    .forget();

    Ok(())
}

fn apply_language(document: &Document, toggle: &Element, language: Language) {
    let Some(root) = document.document_element() else {
        return;
    };

    for (element, text) in bilingual_text_plan(&root, language) {
        element.set_text_content(Some(&text));
    }

    let (english_display, chinese_display) = language.indicator_display();
    if let Some(span) = toggle.select_first(".lang-en") {
        let _ = set_style(&span, "display", english_display);
    }
    if let Some(span) = toggle.select_first(".lang-zh") {
        let _ = set_style(&span, "display", chinese_display);
    }

    if let Some(root) = root.dyn_ref::<HtmlElement>() {
        root.set_lang(language.as_str());
    }
}

fn init_language(context: &SiteContext) -> Result<()> {
    let toggle = context
        .document
        .get_element_by_id("langToggle")
        .ok_or_else(|| SiteError::MissingElement("#langToggle".to_string()))?;

    {
        let document = context.document.clone();
        let toggle = toggle.clone();
        let logger = context.logger;
        context.language.subscribe(move |language| {
            apply_language(&document, &toggle, language);
            logger.debug("language.applied", json!({ "language": language.as_str() }));
        });
    }
    context.language.notify();

    let language = context.language.clone();
    EventListener::new(&toggle, "click", move |_| {
        language.toggle();
    })
    .forget();

    Ok(())
}

fn init_smooth_scroll(context: &SiteContext) -> Result<()> {
    let root = context.root()?;

    for link in root.select_all(r##"a[href^="#"]"##) {
        let window = context.window.clone();
        let document = context.document.clone();
        let offset = context.config.smooth_scroll_offset_px;
        let href = link.get_attribute("href").unwrap_or_default();

        EventListener::new(&link, "click", move |event| {
            event.prevent_default();

            let Some(section) = anchor_target(&href)
                .and_then(|selector| document.query_selector(selector).ok().flatten())
                .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            else {
                return;
            };

            let options = ScrollToOptions::new();
            options.set_top(smooth_scroll_top(f64::from(section.offset_top()), offset));
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        })
        .forget();
    }

    Ok(())
}

fn inject_active_link_style(document: &Document) -> Result<()> {
    let head = document
        .head()
        .ok_or_else(|| SiteError::MissingElement("head".to_string()))?;
    let style = document.create_element("style")?;
    style.set_text_content(Some(ACTIVE_LINK_STYLE));
    head.append_child(&style)?;
    Ok(())
}

fn section_bounds(sections: &[HtmlElement]) -> Vec<SectionBounds> {
    sections
        .iter()
        .map(|section| {
            SectionBounds::new(
                section.id(),
                f64::from(section.offset_top()),
                f64::from(section.offset_height()),
            )
        })
        .collect()
}

fn init_scroll_reactor(context: &SiteContext) -> Result<()> {
    let root = context.root()?;
    let navbar = root.select_first(".navbar");
    let sections: Vec<HtmlElement> = root
        .select_all("section[id]")
        .into_iter()
        .filter_map(|section| section.dyn_into::<HtmlElement>().ok())
        .collect();
    let links = root.select_all(".nav-menu a");
    let threshold = context.config.navbar_threshold_px;
    let offset = context.config.section_offset_px;

    let update = {
        let window = context.window.clone();
        Rc::new(move || {
            let scroll_y = window.scroll_y().unwrap_or(0.0);

            if let Some(navbar) = navbar.as_ref() {
                let _ = set_style(navbar, "box-shadow", navbar_shadow(scroll_y, threshold));
            }

            let bounds = section_bounds(&sections);
            let hrefs: Vec<Option<String>> = links.iter().map(|link| link.get_attribute("href")).collect();
            let states = nav_link_states(&hrefs, active_section(&bounds, scroll_y, offset));
            for (link, active) in links.iter().zip(states) {
                let _ = link.class_list().toggle_with_force(ACTIVE_LINK_CLASS, active);
            }
        })
    };

    let pending: Rc<RefCell<Option<AnimationFrame>>> = Rc::default();
    EventListener::new(&context.window, "scroll", move |_| {
        if pending.borrow().is_some() {
            return;
        }
        let update = update.clone();
        let slot = pending.clone();
        let frame = request_animation_frame(move |_| {
            slot.borrow_mut().take();
            update();
        });
        *pending.borrow_mut() = Some(frame);
    })
    .forget();

    Ok(())
}

fn apply_reveal_style(element: &Element, style: RevealStyle) {
    let _ = set_style(element, "opacity", style.opacity);
    let _ = set_style(element, "transform", style.transform);
}

fn init_reveal(context: &SiteContext) -> Result<()> {
    let blocks: Rc<RefCell<Vec<(Element, Reveal)>>> = Rc::new(RefCell::new(
        context
            .root()?
            .select_all(REVEAL_SELECTOR)
            .into_iter()
            .map(|element| (element, Reveal::default()))
            .collect(),
    ));

    let callback = {
        let blocks = blocks.clone();
        Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                let mut blocks = blocks.borrow_mut();
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let target = entry.target();
                    let Some((_, reveal)) = blocks.iter_mut().find(|(element, _)| *element == target)
                    else {
                        continue;
                    };

                    if let Some(style) = reveal.observe(entry.is_intersecting()) {
                        apply_reveal_style(&target, style);
                        observer.unobserve(&target);
                    }
                }
            },
        )
    };

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    options.set_root_margin(REVEAL_ROOT_MARGIN);
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();

    for (element, reveal) in blocks.borrow().iter() {
        apply_reveal_style(element, reveal.style());
        set_style(element, "transition", REVEAL_TRANSITION)?;
        observer.observe(element);
    }

    Ok(())
}

fn init_typing(context: &SiteContext) -> Result<()> {
    let Some(target) = context
        .document
        .query_selector(&context.config.typing.target)
        .ok()
        .flatten()
    else {
        return Ok(());
    };

    let texts = typing_texts(
        &context.config.typing.texts,
        target.get_attribute("data-typing-texts").as_deref(),
    );
    let Some(engine) = TypingEngine::new(texts, context.config.typing_timing()) else {
        return Ok(());
    };

    remember(start_typing(target, engine, context.config.typing.type_speed_ms));
    Ok(())
}

struct TypingLoop {
    target: Element,
    engine: RefCell<TypingEngine>,
    handle: LoopHandle<Timeout>,
}

impl TypingLoop {
    fn schedule(self: &Rc<Self>, delay_ms: u32) {
        let typing = Rc::clone(self);
        let timeout = Timeout::new(delay_ms, move || {
            if typing.handle.is_cancelled() {
                return;
            }
            let frame = typing.engine.borrow_mut().tick();
            typing.target.set_text_content(Some(&frame.text));
            typing.schedule(frame.delay_ms);
        });
        self.handle.hold(timeout);
    }
}

fn start_typing(target: Element, engine: TypingEngine, first_delay_ms: u32) -> LoopHandle<Timeout> {
    let typing = Rc::new(TypingLoop {
        target,
        engine: RefCell::new(engine),
        handle: LoopHandle::default(),
    });
    typing.schedule(first_delay_ms);
    typing.handle.clone()
}

fn init_particles(context: &SiteContext) -> Result<()> {
    let Some(canvas) = context.document.get_element_by_id(&context.config.particles.canvas_id) else {
        return Ok(());
    };
    let canvas: HtmlCanvasElement = canvas
        .dyn_into()
        .map_err(|_| SiteError::MissingElement(format!("canvas#{}", context.config.particles.canvas_id)))?;
    let drawing: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| SiteError::Dom("2d context unavailable".to_string()))?
        .dyn_into()
        .map_err(|_| SiteError::Dom("unexpected 2d context type".to_string()))?;

    fit_canvas(&context.window, &canvas);
    {
        let window = context.window.clone();
        let canvas = canvas.clone();
        EventListener::new(&context.window, "resize", move |_| fit_canvas(&window, &canvas)).forget();
    }

    let field = ParticleField::populate(
        context.config.particles.count,
        f64::from(canvas.width()),
        f64::from(canvas.height()),
        js_sys::Math::random,
    );

    remember(start_particles(canvas, drawing, field));
    Ok(())
}

fn fit_canvas(window: &Window, canvas: &HtmlCanvasElement) {
    let extent = |value: std::result::Result<JsValue, JsValue>| {
        value.ok().and_then(|value| value.as_f64()).unwrap_or(0.0).max(0.0) as u32
    };

    canvas.set_width(extent(window.inner_width()));
    canvas.set_height(extent(window.inner_height()));
}

struct ParticleLoop {
    canvas: HtmlCanvasElement,
    drawing: CanvasRenderingContext2d,
    field: RefCell<ParticleField>,
    handle: LoopHandle<AnimationFrame>,
}

impl ParticleLoop {
    fn schedule(self: &Rc<Self>) {
        let particles = Rc::clone(self);
        let frame = request_animation_frame(move |_timestamp| {
            if particles.handle.is_cancelled() {
                return;
            }
            particles.draw();
            particles.schedule();
        });
        self.handle.hold(frame);
    }

    fn draw(&self) {
        let width = f64::from(self.canvas.width());
        let height = f64::from(self.canvas.height());
        let mut field = self.field.borrow_mut();

        self.drawing.clear_rect(0.0, 0.0, width, height);
        field.step(width, height);

        self.drawing.set_fill_style_str(PARTICLE_FILL);
        for particle in field.particles() {
            self.drawing.begin_path();
            let _ = self.drawing.arc(particle.x, particle.y, particle.radius, 0.0, TAU);
            self.drawing.fill();
        }
    }
}

fn start_particles(
    canvas: HtmlCanvasElement,
    drawing: CanvasRenderingContext2d,
    field: ParticleField,
) -> LoopHandle<AnimationFrame> {
    let particles = Rc::new(ParticleLoop {
        canvas,
        drawing,
        field: RefCell::new(field),
        handle: LoopHandle::default(),
    });
    particles.schedule();
    particles.handle.clone()
}

fn init_projects(context: &SiteContext) -> Result<()> {
    let router = ProjectRouter::new(context.config.projects.clone());

    for (index, card) in context.root()?.select_all(PROJECT_CARD_SELECTOR).into_iter().enumerate() {
        let Some(destination) = router.destination(index).map(ToString::to_string) else {
            continue;
        };
        set_style(&card, "cursor", "pointer")?;

        let window = context.window.clone();
        let logger = context.logger;
        let listener_card = card.clone();
        EventListener::new(&card, "click", move |event| {
            let interactive_tag = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|target| target.closest(INTERACTIVE_SELECTOR).ok().flatten())
                .filter(|found| {
                    let node: &Node = found;
                    listener_card.contains(Some(node))
                })
                .map(|found| found.tag_name());

            if !click_navigates(interactive_tag.as_deref()) {
                return;
            }

            logger.debug("project.navigate", json!({ "index": index, "url": destination }));
            let _ = window.location().set_href(&destination);
        })
        .forget();
    }

    Ok(())
}

fn init_easter_egg(context: &SiteContext) -> Result<()> {
    let body = context.body()?;
    let logger = context.logger;
    let mut buffer = KeySequenceBuffer::default();

    EventListener::new(&context.document, "keydown", move |event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if !buffer.push(&event.key()) {
            return;
        }

        let style = body.style();
        let _ = style.set_property("transition", SPIN_TRANSITION);
        let _ = style.set_property("transform", SPIN_TRANSFORM);

        let settle = style.clone();
        Timeout::new(SPIN_DURATION_MS, move || {
            let _ = settle.set_property("transform", REST_TRANSFORM);
        })
        .forget();

        logger.info("easter_egg.activated", json!({ "message": "Konami Code activated! You found the easter egg!" }));
    })
    .forget();

    Ok(())
}
