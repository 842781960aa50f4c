//! Text renderings of a distribution.

use crate::dist::Distribution;
use crate::types::Value;

pub trait Render {
    fn render(&self, dist: &Distribution<Value>) -> String;
}

/// One line per outcome: the value, its probability as a percentage and a
/// bar of `#` scaled so the most likely outcome spans `width` characters.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TextHistogram {
    pub width: usize,
}

impl TextHistogram {
    pub const DEFAULT_WIDTH: usize = 50;

    pub const fn new(width: usize) -> Self {
        Self { width }
    }

    fn bar(&self, fraction: f64) -> String {
        let len = (fraction * self.width as f64).round() as usize;
        "#".repeat(len.min(self.width))
    }
}

impl Default for TextHistogram {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH)
    }
}

impl Render for TextHistogram {
    fn render(&self, dist: &Distribution<Value>) -> String {
        let labels: Vec<String> = dist.values().map(ToString::to_string).collect();
        let label_width = labels.iter().map(|s| s.chars().count()).max().unwrap_or(0);
        let max = dist.max_probability().to_f64();

        let mut ret = String::new();
        for (label, event) in labels.iter().zip(dist.events()) {
            let p = event.probability.to_f64();
            let fraction = if max > 0.0 { p / max } else { 0.0 };
            let line = format!(
                "{:>lw$} {:>7.2}% {}",
                label,
                p * 100.0,
                self.bar(fraction),
                lw = label_width
            );
            ret.push_str(line.trim_end());
            ret.push('\n');
        }
        ret
    }
}

/// A markdown table with the exact and approximate probability of each outcome.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct MarkdownHistogram;

impl MarkdownHistogram {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Render for MarkdownHistogram {
    fn render(&self, dist: &Distribution<Value>) -> String {
        let mut ret = String::from("| Outcome | Probability | % |\n|---|---|---:|\n");
        for event in dist.events() {
            ret.push_str(&format!(
                "| `{}` | {} | {:.2}% |\n",
                event.value,
                event.probability,
                event.probability.to_f64() * 100.0
            ));
        }
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dist::{single_uniform_die, Probability};

    fn coin() -> Distribution<Value> {
        Distribution::from_events(vec![
            (Value::Bool(true), Probability::ratio(1, 4)),
            (Value::Bool(false), Probability::ratio(3, 4)),
        ])
    }

    #[test]
    fn test_text_histogram() {
        let text = TextHistogram::new(8).render(&coin());
        assert_eq!(text, "false   75.00% ########\n true   25.00% ###\n");
    }

    #[test]
    fn test_text_histogram_uniform() {
        let d4 = single_uniform_die(4).unwrap().map(|x| Value::Int(*x));
        let text = TextHistogram::new(4).render(&d4);
        assert_eq!(
            text,
            "1   25.00% ####\n2   25.00% ####\n3   25.00% ####\n4   25.00% ####\n"
        );
    }

    #[test]
    fn test_markdown_histogram() {
        let md = MarkdownHistogram::new().render(&coin());
        assert_eq!(
            md,
            "| Outcome | Probability | % |\n|---|---|---:|\n| `false` | 3/4 | 75.00% |\n| `true` | 1/4 | 25.00% |\n"
        );
    }
}
