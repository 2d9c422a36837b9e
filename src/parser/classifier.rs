//! Role classification for collected fragments.
//!
//! Classification needs a document-wide average font size, so it runs in two
//! steps: [`DocumentStats::compute`] over every fragment, then
//! [`BlockClassifier::classify`] which takes those statistics as an argument.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{OutlineOptions, PageGeometry};
use crate::model::{Role, TextFragment};

/// Glyphs that open a bulleted list item.
const BULLETS: [char; 8] = ['•', '-', '*', '◦', '▪', '○', '►', '→'];

/// Document-wide font statistics.
///
/// Only [`DocumentStats::compute`] can build one, so a classifier can never
/// run on a statistic that was not derived from the whole fragment set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentStats {
    avg_font_size: Option<f32>,
    sized_fragments: usize,
    total_fragments: usize,
}

impl DocumentStats {
    /// Compute statistics over every fragment of a document.
    ///
    /// Fragments without a usable font size are left out of the average.
    pub fn compute(fragments: &[TextFragment]) -> Self {
        let sizes: Vec<f32> = fragments
            .iter()
            .filter_map(|f| f.known_font_size())
            .collect();

        let avg_font_size = if sizes.is_empty() {
            None
        } else {
            Some(sizes.iter().sum::<f32>() / sizes.len() as f32)
        };

        Self {
            avg_font_size,
            sized_fragments: sizes.len(),
            total_fragments: fragments.len(),
        }
    }

    /// Mean font size, or `None` if no fragment reported a size.
    pub fn avg_font_size(&self) -> Option<f32> {
        self.avg_font_size
    }

    /// Number of fragments that contributed to the average.
    pub fn sized_fragments(&self) -> usize {
        self.sized_fragments
    }

    /// Number of fragments seen.
    pub fn total_fragments(&self) -> usize {
        self.total_fragments
    }
}

/// Where a fragment sits among the fragments of its page.
#[derive(Debug, Clone, Copy)]
struct PagePosition {
    first: bool,
    last: bool,
}

/// Assigns a [`Role`] to every fragment.
#[derive(Debug, Clone)]
pub struct BlockClassifier {
    options: OutlineOptions,
    list_number: Regex,
}

impl BlockClassifier {
    /// Create a classifier from outline options.
    pub fn new(options: &OutlineOptions) -> Self {
        Self {
            options: options.clone(),
            list_number: Regex::new(r"^\d+\.").expect("list number pattern is valid"),
        }
    }

    /// Classify fragments in document order.
    ///
    /// Fragments are neither added, removed, nor reordered. `pages` supplies
    /// the page geometry used by the header/footer and caption rules; a
    /// fragment whose page is missing simply skips those rules.
    pub fn classify(
        &self,
        mut fragments: Vec<TextFragment>,
        pages: &[PageGeometry],
        stats: &DocumentStats,
    ) -> Vec<TextFragment> {
        let len = fragments.len();
        for i in 0..len {
            let page_number = fragments[i].page_number();
            let position = PagePosition {
                first: i == 0 || fragments[i - 1].page_number() != page_number,
                last: i + 1 == len || fragments[i + 1].page_number() != page_number,
            };
            let page = page_geometry(pages, page_number);
            let role = self.role_for(&fragments[i], position, page, stats);
            fragments[i].set_role(role);
        }

        if log::log_enabled!(log::Level::Debug) {
            let headings = fragments
                .iter()
                .filter(|f| f.role().is_heading_like())
                .count();
            log::debug!(
                "Classified {} fragments ({} title/heading), avg font size {:?}",
                len,
                headings,
                stats.avg_font_size
            );
        }

        fragments
    }

    /// First matching rule wins.
    fn role_for(
        &self,
        fragment: &TextFragment,
        position: PagePosition,
        page: Option<&PageGeometry>,
        stats: &DocumentStats,
    ) -> Role {
        let words = fragment.word_count();

        if let Some(role) = page.and_then(|p| self.running_text_role(fragment, words, p)) {
            return role;
        }

        let size = fragment.known_font_size();
        let avg = stats.avg_font_size;

        if position.first {
            if let (Some(size), Some(avg)) = (size, avg) {
                if size > self.options.title_size_ratio * avg {
                    return Role::Title;
                }
            }
        }

        let large = match (size, avg) {
            (Some(size), Some(avg)) => {
                size >= self.options.min_heading_size
                    && size > self.options.heading_size_ratio * avg
            }
            _ => false,
        };
        if large || (fragment.is_bold && words < self.options.bold_heading_word_limit) {
            return Role::Heading;
        }

        if self.is_list_item(fragment.text()) {
            return Role::ListItem;
        }

        if let Some(page) = page {
            if !position.first
                && !position.last
                && fragment.width() < self.options.caption_width_ratio * page.width
            {
                return Role::Caption;
            }
        }

        Role::Paragraph
    }

    fn running_text_role(
        &self,
        fragment: &TextFragment,
        words: usize,
        page: &PageGeometry,
    ) -> Option<Role> {
        if words >= self.options.header_footer_word_limit {
            return None;
        }
        let band = self.options.header_footer_band * page.height;
        let y = fragment.bbox.y0;
        if y < band {
            Some(Role::Header)
        } else if y > page.height - band {
            Some(Role::Footer)
        } else {
            None
        }
    }

    fn is_list_item(&self, text: &str) -> bool {
        let text = text.trim_start();
        text.starts_with(&BULLETS[..]) || self.list_number.is_match(text)
    }
}

fn page_geometry(pages: &[PageGeometry], number: u32) -> Option<&PageGeometry> {
    // Pages are stored in order, so the index is usually a direct hit.
    match pages.get(number.wrapping_sub(1) as usize) {
        Some(page) if page.number == number => Some(page),
        _ => pages.iter().find(|p| p.number == number),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoundingBox;

    const LETTER: PageGeometry = PageGeometry {
        number: 1,
        width: 612.0,
        height: 792.0,
    };

    fn frag(text: &str, y: f32, width: f32) -> TextFragment {
        TextFragment::new(text, BoundingBox::new(72.0, y, 72.0 + width, y + 12.0), 1).unwrap()
    }

    fn classify(fragments: Vec<TextFragment>) -> Vec<Role> {
        classify_with(fragments, &OutlineOptions::default())
    }

    fn classify_with(fragments: Vec<TextFragment>, options: &OutlineOptions) -> Vec<Role> {
        let stats = DocumentStats::compute(&fragments);
        BlockClassifier::new(options)
            .classify(fragments, &[LETTER], &stats)
            .iter()
            .map(|f| f.role())
            .collect()
    }

    #[test]
    fn test_stats_ignore_missing_sizes() {
        let fragments = vec![
            frag("a", 200.0, 400.0).with_font_size(10.0),
            frag("b", 220.0, 400.0),
            frag("c", 240.0, 400.0).with_font_size(14.0),
        ];
        let stats = DocumentStats::compute(&fragments);
        assert_eq!(stats.avg_font_size(), Some(12.0));
        assert_eq!(stats.sized_fragments(), 2);
        assert_eq!(stats.total_fragments(), 3);

        let empty = DocumentStats::compute(&[]);
        assert_eq!(empty.avg_font_size(), None);
    }

    #[test]
    fn test_header_footer_wins_over_heading() {
        let roles = classify(vec![
            frag("Running Head", 20.0, 200.0).with_font_size(30.0).bold(),
            frag("body text line", 300.0, 500.0).with_font_size(10.0),
            frag("Page 7", 770.0, 50.0).with_font_size(30.0).bold(),
        ]);
        assert_eq!(roles, vec![Role::Header, Role::Paragraph, Role::Footer]);
    }

    #[test]
    fn test_long_line_in_band_is_not_header() {
        let long = "one two three four five six seven eight nine ten eleven";
        let roles = classify(vec![frag(long, 20.0, 500.0).with_font_size(10.0)]);
        assert_eq!(roles, vec![Role::Paragraph]);
    }

    #[test]
    fn test_title_only_first_on_page() {
        let roles = classify(vec![
            frag("Big Title", 200.0, 300.0).with_font_size(40.0),
            frag("Second Big", 240.0, 300.0).with_font_size(40.0),
            frag("body one", 300.0, 500.0).with_font_size(10.0),
            frag("body two", 320.0, 500.0).with_font_size(10.0),
            frag("body three", 340.0, 500.0).with_font_size(10.0),
            frag("body four", 360.0, 500.0).with_font_size(10.0),
        ]);
        // avg = 20: 40 > 30 makes a title only in first position.
        assert_eq!(roles[0], Role::Title);
        assert_eq!(roles[1], Role::Heading);
    }

    #[test]
    fn test_heading_needs_min_size() {
        let options = OutlineOptions::default();
        let roles = classify_with(
            vec![
                frag("Small but larger", 200.0, 500.0).with_font_size(11.0),
                frag("tiny", 220.0, 500.0).with_font_size(6.0),
                frag("tiny", 240.0, 500.0).with_font_size(6.0),
            ],
            &options,
        );
        // avg ~7.7; 11 > 1.2 * avg but 11 < 12.
        assert_eq!(roles[0], Role::Paragraph);
    }

    #[test]
    fn test_bold_short_line_is_heading_without_size() {
        let roles = classify(vec![
            frag("Short bold", 200.0, 500.0).bold(),
            frag("body", 220.0, 500.0),
        ]);
        assert_eq!(roles, vec![Role::Heading, Role::Paragraph]);

        let wordy = (0..25).map(|_| "word").collect::<Vec<_>>().join(" ");
        let roles = classify(vec![frag(&wordy, 200.0, 500.0).bold()]);
        assert_eq!(roles, vec![Role::Paragraph]);
    }

    #[test]
    fn test_heading_wins_over_list_item() {
        let roles = classify(vec![
            frag("1. Introduction", 200.0, 500.0).bold(),
            frag("- a bullet", 220.0, 500.0),
            frag("12. numbered", 240.0, 500.0),
            frag("• dot", 260.0, 500.0),
        ]);
        assert_eq!(
            roles,
            vec![
                Role::Heading,
                Role::ListItem,
                Role::ListItem,
                Role::ListItem
            ]
        );
    }

    #[test]
    fn test_caption_needs_neighbours() {
        let roles = classify(vec![
            frag("narrow first", 200.0, 100.0),
            frag("Figure 1: narrow middle", 220.0, 150.0),
            frag("wide middle line of body text", 240.0, 500.0),
            frag("narrow last", 260.0, 100.0),
        ]);
        assert_eq!(
            roles,
            vec![
                Role::Paragraph,
                Role::Caption,
                Role::Paragraph,
                Role::Paragraph
            ]
        );
    }

    #[test]
    fn test_position_is_per_page() {
        let page2 = TextFragment::new(
            "Second page title",
            BoundingBox::new(72.0, 200.0, 372.0, 212.0),
            2,
        )
        .unwrap()
        .with_font_size(40.0);
        let fragments = vec![
            frag("body a", 200.0, 500.0).with_font_size(10.0),
            frag("body b", 220.0, 500.0).with_font_size(10.0),
            frag("body c", 240.0, 500.0).with_font_size(10.0),
            page2,
        ];
        let pages = [
            LETTER,
            PageGeometry {
                number: 2,
                ..LETTER
            },
        ];
        let stats = DocumentStats::compute(&fragments);
        let roles: Vec<Role> = BlockClassifier::new(&OutlineOptions::default())
            .classify(fragments, &pages, &stats)
            .iter()
            .map(|f| f.role())
            .collect();
        // avg = 17.5; 40 > 26.25 and it opens page 2.
        assert_eq!(roles[3], Role::Title);
    }

    #[test]
    fn test_missing_page_geometry_skips_position_rules() {
        let fragments = vec![
            frag("Header-ish", 5.0, 50.0),
            frag("narrow", 300.0, 50.0),
            frag("end", 500.0, 50.0),
        ];
        let stats = DocumentStats::compute(&fragments);
        let roles: Vec<Role> = BlockClassifier::new(&OutlineOptions::default())
            .classify(fragments, &[], &stats)
            .iter()
            .map(|f| f.role())
            .collect();
        assert_eq!(roles, vec![Role::Paragraph; 3]);
    }

    #[test]
    fn test_classify_preserves_order_and_count() {
        let fragments = vec![
            frag("one", 200.0, 500.0),
            frag("two", 220.0, 500.0),
            frag("three", 240.0, 500.0),
        ];
        let stats = DocumentStats::compute(&fragments);
        let out = BlockClassifier::new(&OutlineOptions::default()).classify(
            fragments,
            &[LETTER],
            &stats,
        );
        let texts: Vec<_> = out.iter().map(|f| f.text()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
        assert!(out.iter().all(|f| f.role() != Role::Unknown));
    }
}
