use probcut_core::constants::SCORE_INF;
use probcut_core::types::{Depth, Score};
use probcut_core::{Bound, Cutoff, Decision, ProbCut, ProbeSearch, Selectivity};

const BRANCHING: u64 = 4;

fn mix(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Node of a synthetic game tree whose negamax value is the same at every depth.
///
/// Exactly one child mirrors the parent value; all others are worse for the
/// side to move, so a shallow search predicts a deep one perfectly.
#[derive(Clone, Copy, Debug)]
struct Node {
    id: u64,
    value: Score,
}

impl Node {
    fn root(id: u64, value: Score) -> Self {
        Node { id, value }
    }

    fn children(self) -> impl Iterator<Item = Node> {
        let best = mix(self.id) % BRANCHING;
        (0..BRANCHING).map(move |i| {
            let id = mix(self.id ^ (i + 1).wrapping_mul(0x0100_0000_01B3));
            let slack = if i == best {
                0
            } else {
                1 + (mix(id) % 20) as Score
            };
            Node {
                id,
                value: -self.value + slack,
            }
        })
    }
}

/// Fail-hard negamax that consults ProbCut before expanding a node.
struct TreeSearch<'a> {
    probcut: &'a ProbCut,
    min_probcut_depth: Depth,
    stack: Vec<Node>,
    probing: bool,
    nodes: u64,
    node_limit: u64,
    cutoffs: u64,
}

impl<'a> TreeSearch<'a> {
    fn new(probcut: &'a ProbCut) -> Self {
        TreeSearch {
            probcut,
            min_probcut_depth: 3,
            stack: Vec::new(),
            probing: false,
            nodes: 0,
            node_limit: u64::MAX,
            cutoffs: 0,
        }
    }

    fn run(&mut self, root: Node, depth: Depth) -> Option<Score> {
        self.stack.push(root);
        let score = self.negamax(depth, -SCORE_INF, SCORE_INF);
        self.stack.pop();
        score
    }

    fn negamax(&mut self, depth: Depth, mut alpha: Score, beta: Score) -> Option<Score> {
        self.nodes += 1;
        if self.nodes > self.node_limit {
            return None;
        }

        let node = *self.stack.last().expect("search stack is empty");
        if depth == 0 {
            return Some(node.value);
        }

        if depth >= self.min_probcut_depth {
            let probcut = self.probcut;
            if let Decision::Cutoff { value, .. } = probcut.try_cutoff(self, depth, alpha, beta) {
                self.cutoffs += 1;
                return Some(value);
            }
        }

        for child in node.children() {
            self.stack.push(child);
            let score = self.negamax(depth - 1, -beta, -alpha).map(|s| -s);
            self.stack.pop();

            let score = score?;
            if score >= beta {
                return Some(beta);
            }
            if score > alpha {
                alpha = score;
            }
        }
        Some(alpha)
    }
}

impl ProbeSearch for TreeSearch<'_> {
    fn probe(&mut self, depth: Depth, alpha: Score, beta: Score) -> Option<Score> {
        self.negamax(depth, alpha, beta)
    }

    fn is_probing(&self) -> bool {
        self.probing
    }

    fn set_probing(&mut self, probing: bool) {
        self.probing = probing;
    }
}

fn calibrated_probcut() -> ProbCut {
    let mut probcut = ProbCut::new();
    for deep in 3..=6 {
        probcut
            .add_cutoff(Cutoff::new(deep - 2, deep, 1.0, 0.0, 1.0))
            .unwrap();
    }
    probcut.set_selectivity(Selectivity::Level0);
    probcut
}

#[test]
fn test_disabled_matches_plain_search() {
    let root = Node::root(42, 7);

    let mut plain_probcut = ProbCut::new();
    plain_probcut.set_enabled(false);
    let mut plain = TreeSearch::new(&plain_probcut);
    plain.min_probcut_depth = Depth::MAX;
    let expected = plain.run(root, 6);

    let mut probcut = calibrated_probcut();
    probcut.set_enabled(false);
    let mut search = TreeSearch::new(&probcut);
    let score = search.run(root, 6);

    assert_eq!(expected, Some(7));
    assert_eq!(score, expected);
    assert_eq!(search.nodes, plain.nodes);
    assert_eq!(search.cutoffs, 0);
}

#[test]
fn test_cutoffs_preserve_value_of_consistent_tree() {
    let probcut = calibrated_probcut();

    for (id, value) in [(1, 0), (42, 7), (1234, -15), (99, 30)] {
        let root = Node::root(id, value);
        let mut search = TreeSearch::new(&probcut);
        assert_eq!(search.run(root, 6), Some(value));
        assert!(search.cutoffs > 0);
        assert!(!search.probing);
    }
}

#[test]
fn test_unreachable_threshold_never_probes() {
    let root = Node::root(7, -3);

    let mut plain_probcut = ProbCut::new();
    plain_probcut.set_enabled(false);
    let mut plain = TreeSearch::new(&plain_probcut);
    let expected = plain.run(root, 6);

    let mut probcut = calibrated_probcut();
    probcut.set_threshold(1.0e6).unwrap();
    let mut search = TreeSearch::new(&probcut);

    assert_eq!(search.run(root, 6), expected);
    assert_eq!(search.nodes, plain.nodes);
    assert_eq!(search.cutoffs, 0);
}

#[test]
fn test_cutoff_bounds_are_sound() {
    let probcut = calibrated_probcut();
    let root = Node::root(5, 10);

    let mut search = TreeSearch::new(&probcut);
    search.stack.push(root);

    assert_eq!(
        probcut.try_cutoff(&mut search, 6, -20, 4),
        Decision::Cutoff {
            value: 4,
            bound: Bound::Lower
        }
    );
    assert_eq!(
        probcut.try_cutoff(&mut search, 6, 15, 40),
        Decision::Cutoff {
            value: 15,
            bound: Bound::Upper
        }
    );
    // 10 +/- 1 is inside (9, 11) by too little to prove anything.
    assert_eq!(probcut.try_cutoff(&mut search, 6, 9, 11), Decision::NoCutoff);
    assert!(!search.probing);
}

#[test]
fn test_repeated_calls_are_identical() {
    let probcut = calibrated_probcut();
    let root = Node::root(77, 2);

    let mut search = TreeSearch::new(&probcut);
    search.stack.push(root);

    for (alpha, beta) in [(-10, 0), (5, 30), (0, 3), (-SCORE_INF, SCORE_INF)] {
        let first = probcut.try_cutoff(&mut search, 5, alpha, beta);
        let second = probcut.try_cutoff(&mut search, 5, alpha, beta);
        assert_eq!(first, second);
        assert!(!first.is_exact());
    }
}

#[test]
fn test_aborted_probe_falls_back_to_full_search() {
    let probcut = calibrated_probcut();
    let mut search = TreeSearch::new(&probcut);
    search.stack.push(Node::root(3, 0));
    search.node_limit = 0;

    assert_eq!(probcut.try_cutoff(&mut search, 6, -20, 4), Decision::NoCutoff);
    assert!(!search.probing);
}

#[test]
fn test_shared_between_threads() {
    let probcut = calibrated_probcut();
    let roots: Vec<Node> = (0..8).map(|i| Node::root(1000 + i, i as Score - 4)).collect();

    let results: Vec<Option<Score>> = std::thread::scope(|s| {
        let handles: Vec<_> = roots
            .iter()
            .map(|&root| {
                let probcut = &probcut;
                s.spawn(move || TreeSearch::new(probcut).run(root, 6))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (root, result) in roots.iter().zip(results) {
        assert_eq!(result, Some(root.value));
    }
}
