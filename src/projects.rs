pub fn default_project_routes() -> Vec<String> {
    vec![
        "projects/cauldron.html".to_string(),
        "projects/sports-career.html".to_string(),
        "projects/darts.html".to_string(),
    ]
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectRouter {
    routes: Vec<String>,
}

impl ProjectRouter {
    pub fn new(routes: Vec<String>) -> Self {
        Self { routes }
    }

    // Unmapped or blank routes leave the card inert.
    pub fn destination(&self, index: usize) -> Option<&str> {
        self.routes
            .get(index)
            .map(String::as_str)
            .filter(|route| !route.trim().is_empty())
    }
}

// `interactive_tag`: nearest `a`/`button` ancestor of the target inside the card.
pub fn click_navigates(interactive_tag: Option<&str>) -> bool {
    !interactive_tag.is_some_and(|tag| tag.eq_ignore_ascii_case("a") || tag.eq_ignore_ascii_case("button"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_three_cards_are_mapped() {
        let router = ProjectRouter::new(default_project_routes());

        assert_eq!(router.destination(0), Some("projects/cauldron.html"));
        assert_eq!(router.destination(1), Some("projects/sports-career.html"));
        assert_eq!(router.destination(2), Some("projects/darts.html"));
        assert_eq!(router.destination(3), None);
    }

    #[test]
    fn blank_route_leaves_card_inert() {
        let router = ProjectRouter::new(vec![String::new(), "projects/darts.html".to_string()]);

        assert_eq!(router.destination(0), None);
        assert_eq!(router.destination(1), Some("projects/darts.html"));
    }

    #[test]
    fn embedded_links_and_buttons_do_not_navigate() {
        assert!(click_navigates(None));
        assert!(!click_navigates(Some("A")));
        assert!(!click_navigates(Some("BUTTON")));
        assert!(click_navigates(Some("SPAN")));
    }
}
