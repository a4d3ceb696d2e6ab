use crate::models::Thought;
use crate::store::StoredDocument;
use crate::ui::escape_html;

/// The in-memory thought list with a current index and the thought on screen.
#[derive(Debug, Default, Clone)]
pub struct Carousel {
    thoughts: Vec<StoredDocument<Thought>>,
    index: usize,
    displayed: Option<StoredDocument<Thought>>,
}

impl Carousel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a freshly fetched list and rewind to the first thought.
    /// What is on screen does not change until [`Carousel::show`] runs.
    pub fn replace(&mut self, thoughts: Vec<StoredDocument<Thought>>) {
        self.thoughts = thoughts;
        self.index = 0;
    }

    /// Put the thought at `index` on screen; returns `false` and leaves the
    /// screen alone when there is none.
    pub fn show(&mut self, index: usize) -> bool {
        match self.thoughts.get(index) {
            Some(thought) => {
                self.displayed = Some(thought.clone());
                true
            }
            None => false,
        }
    }

    pub fn show_current(&mut self) -> bool {
        self.show(self.index)
    }

    /// Advance with wrap-around. No-op on an empty list.
    pub fn next(&mut self) {
        if self.thoughts.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.thoughts.len();
        self.show(self.index);
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn thoughts(&self) -> &[StoredDocument<Thought>] {
        &self.thoughts
    }

    pub fn displayed(&self) -> Option<&StoredDocument<Thought>> {
        self.displayed.as_ref()
    }

    /// The download action is offered only for downloadable thoughts.
    pub fn download_visible(&self) -> bool {
        self.displayed
            .as_ref()
            .map_or(false, |doc| doc.data.is_downloadable())
    }

    /// Markup for the display region, `None` while nothing was ever shown.
    pub fn to_html(&self) -> Option<String> {
        self.displayed.as_ref().map(|doc| render_thought(&doc.data))
    }
}

fn render_thought(thought: &Thought) -> String {
    if thought.is_image() {
        format!(
            r#"<img src="{}" alt="Daily Image Thought">"#,
            escape_html(&thought.content)
        )
    } else {
        format!(
            r#"<p style="font-size: 18px;">{}</p>"#,
            escape_html(&thought.content)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(n: usize) -> Vec<StoredDocument<Thought>> {
        (0..n)
            .map(|i| StoredDocument {
                id: format!("t{}", i),
                data: Thought::new("text", &format!("thought {}", i)),
            })
            .collect()
    }

    #[test]
    fn test_next_cycles_back_to_first_after_n_clicks() {
        for n in 1..=5 {
            let mut carousel = Carousel::new();
            carousel.replace(docs(n));
            carousel.show_current();

            let mut seen = Vec::new();
            for _ in 0..n {
                carousel.next();
                seen.push(carousel.displayed().unwrap().id.clone());
            }

            assert_eq!(carousel.displayed().unwrap().id, "t0", "n = {}", n);
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), n);
        }
    }

    #[test]
    fn test_next_on_empty_list_changes_nothing() {
        let mut carousel = Carousel::new();
        carousel.replace(Vec::new());
        assert!(!carousel.show_current());

        carousel.next();

        assert_eq!(carousel.index(), 0);
        assert!(carousel.displayed().is_none());
        assert!(carousel.to_html().is_none());
    }

    #[test]
    fn test_render_by_kind() {
        let mut carousel = Carousel::new();
        let mut image = Thought::new("images", "https://x/a.jpg");
        image.downloadable = Some(true);
        carousel.replace(vec![
            StoredDocument { id: "a".into(), data: image },
            StoredDocument { id: "b".into(), data: Thought::new("text", "5 < 6") },
        ]);

        carousel.show_current();
        assert_eq!(
            carousel.to_html().unwrap(),
            r#"<img src="https://x/a.jpg" alt="Daily Image Thought">"#
        );
        assert!(carousel.download_visible());

        carousel.next();
        assert_eq!(
            carousel.to_html().unwrap(),
            r#"<p style="font-size: 18px;">5 &lt; 6</p>"#
        );
        assert!(!carousel.download_visible());
    }
}
