use crate::language::Language;

pub const BILINGUAL_SELECTOR: &str = "[data-en][data-zh]";

pub trait MarkupNode: Sized {
    fn attr(&self, name: &str) -> Option<String>;

    fn text_content(&self) -> String;

    fn select_first(&self, selector: &str) -> Option<Self>;

    fn select_all(&self, selector: &str) -> Vec<Self>;

    fn visible_text(&self) -> String {
        collapse_whitespace(&self.text_content())
    }
}

pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn localized_text<N: MarkupNode>(node: &N, language: Language) -> String {
    node.attr(language.attribute()).unwrap_or_default()
}

// Falls back to the element's own text when it has no variant for `language`.
pub fn localized_or_visible<N: MarkupNode>(node: &N, language: Language) -> String {
    node.attr(language.attribute())
        .map(|value| collapse_whitespace(&value))
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| node.visible_text())
}

pub fn bilingual_text_plan<N: MarkupNode>(root: &N, language: Language) -> Vec<(N, String)> {
    root.select_all(BILINGUAL_SELECTOR)
        .into_iter()
        .map(|node| {
            let text = localized_text(&node, language);
            (node, text)
        })
        .collect()
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::MarkupNode;
    use wasm_bindgen::JsCast;
    use web_sys::Element;

    impl MarkupNode for Element {
        fn attr(&self, name: &str) -> Option<String> {
            self.get_attribute(name)
        }

        fn text_content(&self) -> String {
            web_sys::Node::text_content(self).unwrap_or_default()
        }

        fn select_first(&self, selector: &str) -> Option<Self> {
            self.query_selector(selector).ok().flatten()
        }

        fn select_all(&self, selector: &str) -> Vec<Self> {
            let Ok(nodes) = self.query_selector_all(selector) else {
                return Vec::new();
            };

            (0..nodes.length())
                .filter_map(|index| nodes.get(index))
                .filter_map(|node| node.dyn_into::<Element>().ok())
                .collect()
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn localized_text_follows_language() {
        let document = Html::parse_fragment(r#"<p data-en="Hello" data-zh="你好">Hello</p>"#);
        let paragraph = document.root_element().select_first("p").expect("paragraph");

        assert_eq!(localized_text(&paragraph, Language::English), "Hello");
        assert_eq!(localized_text(&paragraph, Language::Chinese), "你好");
    }

    #[test]
    fn missing_variant_renders_empty() {
        let document = Html::parse_fragment(r#"<p data-en="Only English">x</p>"#);
        let paragraph = document.root_element().select_first("p").expect("paragraph");

        assert_eq!(localized_text(&paragraph, Language::Chinese), "");
        assert_eq!(localized_or_visible(&paragraph, Language::Chinese), "x");
    }

    #[test]
    fn plan_covers_only_elements_with_both_variants() {
        let document = Html::parse_fragment(
            r##"<nav>
                <a href="#about" data-en="About" data-zh="關於">About</a>
                <a href="#work" data-en="Work" data-zh="經歷">Work</a>
                <span data-en="Half">Half</span>
                <p>Plain</p>
            </nav>"##,
        );

        let plan = bilingual_text_plan(&document.root_element(), Language::Chinese);
        let texts: Vec<&str> = plan.iter().map(|(_, text)| text.as_str()).collect();

        assert_eq!(texts, ["關於", "經歷"]);
    }

    #[test]
    fn toggling_twice_restores_every_bilingual_text() {
        let document = Html::parse_fragment(
            r#"<div>
                <h2 data-en="Projects" data-zh="專案">Projects</h2>
                <button data-en="Contact me" data-zh="聯絡我">Contact me</button>
            </div>"#,
        );
        let root = document.root_element();
        let start = Language::English;

        let shown_before: Vec<String> = root
            .select_all(BILINGUAL_SELECTOR)
            .iter()
            .map(MarkupNode::visible_text)
            .collect();
        let toggled: Vec<String> = bilingual_text_plan(&root, start.toggled())
            .into_iter()
            .map(|(_, text)| text)
            .collect();
        let restored: Vec<String> = bilingual_text_plan(&root, start.toggled().toggled())
            .into_iter()
            .map(|(_, text)| text)
            .collect();

        assert_eq!(toggled, ["專案", "聯絡我"]);
        assert_eq!(restored, shown_before);
    }

    #[test]
    fn visible_text_collapses_layout_whitespace() {
        let document = Html::parse_fragment("<h3>\n   Senior\n   Engineer  </h3>");
        let heading = document.root_element().select_first("h3").expect("heading");

        assert_eq!(heading.visible_text(), "Senior Engineer");
    }
}
