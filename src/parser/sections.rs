use super::classify::{LabeledBlock, SectionLabel};

/// Maximal contiguous run of blocks sharing one resolved label.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpan {
    pub label: SectionLabel,
    pub start_index: usize,
    /// Inclusive.
    pub end_index: usize,
    pub blocks: Vec<LabeledBlock>,
}

impl SectionSpan {
    /// Block texts joined by blank lines, in document order.
    pub fn text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.block.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn lines(&self) -> Vec<&str> {
        self.blocks.iter().flat_map(|b| b.block.text.lines()).collect()
    }

    pub fn mean_confidence(&self) -> f32 {
        if self.blocks.is_empty() {
            return 0.0;
        }
        self.blocks.iter().map(|b| b.confidence).sum::<f32>() / self.blocks.len() as f32
    }

    fn is_noise(&self, threshold: f32) -> bool {
        self.blocks.len() == 1 && self.blocks[0].confidence < threshold
    }
}

/// Partition labeled blocks into spans, absorbing isolated low-confidence
/// blocks into the section that surrounds them.
///
/// Smoothing runs once against the raw partition: a single-block span below
/// `threshold` whose left and right neighbours agree takes their label. Spans
/// at either end of the document keep their label.
pub fn group(labeled: &[LabeledBlock], threshold: f32) -> Vec<SectionSpan> {
    let raw = partition(labeled);

    let resolved: Vec<SectionLabel> = (0..raw.len())
        .map(|i| {
            let span = &raw[i];
            if i == 0 || i + 1 == raw.len() || !span.is_noise(threshold) {
                return span.label;
            }
            let (left, right) = (raw[i - 1].label, raw[i + 1].label);
            if left == right {
                left
            } else {
                span.label
            }
        })
        .collect();

    let mut spans: Vec<SectionSpan> = Vec::with_capacity(raw.len());
    for (span, label) in raw.into_iter().zip(resolved) {
        match spans.last_mut() {
            Some(prev) if prev.label == label => {
                prev.end_index = span.end_index;
                prev.blocks.extend(span.blocks);
            }
            _ => spans.push(SectionSpan { label, ..span }),
        }
    }

    spans
}

fn partition(labeled: &[LabeledBlock]) -> Vec<SectionSpan> {
    let mut spans: Vec<SectionSpan> = Vec::new();
    for lb in labeled {
        match spans.last_mut() {
            Some(span) if span.label == lb.label => {
                span.end_index = lb.block.index;
                span.blocks.push(lb.clone());
            }
            _ => spans.push(SectionSpan {
                label: lb.label,
                start_index: lb.block.index,
                end_index: lb.block.index,
                blocks: vec![lb.clone()],
            }),
        }
    }
    spans
}

// ── Tests ──
