//! Presentational components.
//!
//! Pure render functions of their inputs. Each returns a `String` so the
//! screen decides where it goes; nothing here touches IO or state.

use catalog_engine::{CatalogState, Product, SortOption};
use owo_colors::{OwoColorize, Style};

const ACCENT: (u8, u8, u8) = (124, 101, 242);
const MUTED: (u8, u8, u8) = (152, 153, 157);

/// Widest a card line may get before it is cut.
const CARD_WIDTH: usize = 64;
const CARD_INDENT: &str = "    ";

/// Renders catalog components, with or without ANSI colors.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Plain text output, used by tests and non-terminal stdout.
    pub fn plain() -> Self {
        Self::new(false)
    }

    fn styled(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    fn muted(&self, text: &str) -> String {
        self.styled(text, Style::new().truecolor(MUTED.0, MUTED.1, MUTED.2))
    }

    fn chip(&self, label: &str, is_active: bool) -> String {
        let (r, g, b) = ACCENT;
        if is_active {
            let style = Style::new().white().bold().on_truecolor(r, g, b);
            self.styled(&format!("[{}]", label), style)
        } else {
            self.styled(&format!("({})", label), Style::new().truecolor(r, g, b))
        }
    }

    /// A category chip. Active chips are bracketed, inactive ones parenthesised.
    pub fn category_filter_button(&self, label: &str, is_active: bool) -> String {
        self.chip(label, is_active)
    }

    pub fn sort_button(&self, option: SortOption, is_active: bool) -> String {
        self.chip(option.label(), is_active)
    }

    /// One product row: heart, title, image URL, two lines of description,
    /// category, price.
    pub fn product_card(&self, product: &Product) -> String {
        let heart = if product.favorite {
            self.styled("♥", Style::new().red())
        } else {
            "♡".to_string()
        };

        let title = ellipsize(product.title(), CARD_WIDTH);
        let mut lines = vec![format!(
            " {} {} {}",
            heart,
            self.muted(&format!("#{}", product.id())),
            self.styled(&title, Style::new().bold())
        )];

        if !product.image().is_empty() {
            let image = ellipsize(product.image(), CARD_WIDTH);
            lines.push(format!(
                "{}{}",
                CARD_INDENT,
                self.styled(&image, Style::new().dimmed())
            ));
        }

        for line in wrap(product.description(), CARD_WIDTH, 2) {
            lines.push(format!("{}{}", CARD_INDENT, line));
        }

        lines.push(format!(
            "{}{}",
            CARD_INDENT,
            self.styled(&format!("Category: {}", product.category()), Style::new().bold())
        ));

        let (r, g, b) = ACCENT;
        lines.push(format!(
            "{}{}",
            CARD_INDENT,
            self.styled(&format_price(product.price()), Style::new().truecolor(r, g, b).bold())
        ));

        lines.join("\n")
    }

    /// The whole catalog screen for one state.
    pub fn render_screen(&self, state: &CatalogState) -> String {
        let mut out = Vec::new();

        out.push(self.styled("Product Catalog", Style::new().bold()));

        let search = if state.search_query().is_empty() {
            self.muted("Search products")
        } else {
            state.search_query().to_string()
        };
        out.push(format!("Search: {}", search));

        let categories: Vec<String> = state
            .categories()
            .iter()
            .map(|c| self.category_filter_button(c, c == state.active_category()))
            .collect();
        out.push(categories.join(" "));

        let sorts: Vec<String> = SortOption::ALL
            .iter()
            .map(|&option| self.sort_button(option, option == state.sort_option()))
            .collect();
        out.push(sorts.join(" "));
        out.push(String::new());

        if state.loading() {
            out.push("Loading...".to_string());
            return out.join("\n");
        }

        let derived = state.derived();
        if derived.is_empty() {
            out.push("No products".to_string());
            return out.join("\n");
        }

        let visible: Vec<&Product> = derived.iter().take(state.visible_count()).copied().collect();
        for product in &visible {
            out.push(self.product_card(product));
            out.push(String::new());
        }

        let remaining = derived.len() - visible.len();
        if remaining > 0 {
            out.push(self.muted(&format!("{} more, type `more` to load", remaining)));
        } else {
            out.push(format!("{} of {} shown", visible.len(), derived.len()));
        }

        out.join("\n")
    }
}

/// `$20` for whole prices, `$109.95` otherwise.
pub fn format_price(price: f64) -> String {
    format!("${}", price)
}

/// Cut `text` to at most `width` characters, ending in an ellipsis when cut.
pub fn ellipsize(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

/// Greedy word wrap limited to `max_lines`; the last line is ellipsised if
/// text remains.
pub fn wrap(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let cut = ellipsize(last, width.saturating_sub(1));
            *last = if cut.ends_with('…') { cut } else { format!("{}…", cut) };
        }
    }

    lines
        .into_iter()
        .map(|line| ellipsize(&line, width))
        .collect()
}
