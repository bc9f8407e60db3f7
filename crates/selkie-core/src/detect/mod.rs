use serde::Serialize;

/// Diagram family inferred from the first declaration line of a buffer.
///
/// Kinds form a closed set: the heuristics downstream only branch on a few of
/// them (flowchart arrow grammar, sequence arrow misuse), and unrecognized
/// input degrades to [`DiagramKind::Unknown`] rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagramKind {
    Flowchart,
    Sequence,
    Class,
    State,
    EntityRelation,
    Journey,
    Gantt,
    Pie,
    GitGraph,
    MindMap,
    Timeline,
    Unknown,
}

impl DiagramKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagramKind::Flowchart => "flowchart",
            DiagramKind::Sequence => "sequence",
            DiagramKind::Class => "class",
            DiagramKind::State => "state",
            DiagramKind::EntityRelation => "entityRelation",
            DiagramKind::Journey => "journey",
            DiagramKind::Gantt => "gantt",
            DiagramKind::Pie => "pie",
            DiagramKind::GitGraph => "gitGraph",
            DiagramKind::MindMap => "mindMap",
            DiagramKind::Timeline => "timeline",
            DiagramKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detector receives the first meaningful line of the buffer, already
/// lower-cased, and reports whether it belongs to its diagram family.
pub type KindDetector = fn(line: &str) -> bool;

#[derive(Debug, Clone, Default)]
pub struct DetectorRegistry {
    detectors: Vec<(DiagramKind, KindDetector)>,
}

impl DetectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_fn(&mut self, kind: DiagramKind, detector: KindDetector) {
        self.detectors.push((kind, detector));
    }

    /// Classifies `text` by its first non-empty, non-comment line.
    ///
    /// First registered match wins. No match (or no meaningful line at all)
    /// yields [`DiagramKind::Unknown`]; detection never fails.
    pub fn detect(&self, text: &str) -> DiagramKind {
        let Some(line) = first_meaningful_line(text) else {
            return DiagramKind::Unknown;
        };
        let line = line.to_lowercase();
        for (kind, detector) in &self.detectors {
            if detector(&line) {
                return *kind;
            }
        }
        DiagramKind::Unknown
    }

    pub fn default_table() -> Self {
        let mut reg = Self::new();

        // The registration order is significant: keyword membership is
        // substring-based, so specific tokens must come before shorter ones
        // they contain ("gitgraph" before the "graph"/"flowchart" catch-all,
        // "statediagram" before anything that could shadow `stateDiagram-v2`).
        reg.add_fn(DiagramKind::Sequence, detector_sequence);
        reg.add_fn(DiagramKind::Class, detector_class);
        reg.add_fn(DiagramKind::State, detector_state);
        reg.add_fn(DiagramKind::EntityRelation, detector_er);
        reg.add_fn(DiagramKind::Journey, detector_journey);
        reg.add_fn(DiagramKind::Gantt, detector_gantt);
        reg.add_fn(DiagramKind::Pie, detector_pie);
        reg.add_fn(DiagramKind::GitGraph, detector_git_graph);
        reg.add_fn(DiagramKind::MindMap, detector_mindmap);
        reg.add_fn(DiagramKind::Timeline, detector_timeline);
        reg.add_fn(DiagramKind::Flowchart, detector_flowchart);

        reg
    }
}

/// Classifies `text` against the default detector table.
pub fn detect_kind(text: &str) -> DiagramKind {
    DetectorRegistry::default_table().detect(text)
}

fn first_meaningful_line(text: &str) -> Option<&str> {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with("%%"))
}

fn detector_sequence(line: &str) -> bool {
    line.contains("sequencediagram")
}

fn detector_class(line: &str) -> bool {
    line.contains("classdiagram")
}

fn detector_state(line: &str) -> bool {
    // Covers both `stateDiagram` and `stateDiagram-v2`.
    line.contains("statediagram")
}

fn detector_er(line: &str) -> bool {
    line.contains("erdiagram")
}

fn detector_journey(line: &str) -> bool {
    line.contains("journey")
}

fn detector_gantt(line: &str) -> bool {
    line.contains("gantt")
}

fn detector_pie(line: &str) -> bool {
    line.contains("pie")
}

fn detector_git_graph(line: &str) -> bool {
    line.contains("gitgraph")
}

fn detector_mindmap(line: &str) -> bool {
    line.contains("mindmap")
}

fn detector_timeline(line: &str) -> bool {
    line.contains("timeline")
}

fn detector_flowchart(line: &str) -> bool {
    line.contains("graph") || line.contains("flowchart")
}
