// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use triescope_imaging::ImagingBackend;
use triescope_imaging_svg::SvgBackend;
use triescope_scene::KeyedLayer;
use triescope_trie::{PrefixId, Trie};

use crate::config::DiagramConfig;
use crate::element::{HIGHLIGHT_STROKE_WIDTH, LINK_STROKE_WIDTH, LinkElement, NodeElement};
use crate::paint::{FrameResources, paint_scene};
use crate::render::{RenderReport, Surface, render_pass};
use crate::theme::{NoTheme, Palette, ThemeSource};

/// Pause between words in [`TrieDiagram::add_words_animated`] when the
/// caller has no preference.
pub const DEFAULT_ANIMATION_DELAY: Duration = Duration::from_millis(500);

/// What a [`WordBatch`] wants after a step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BatchStep {
    /// More words follow; pause before the next step.
    Pause,
    /// Every word has been offered.
    Done,
}

/// Words fed to a diagram one step at a time.
///
/// This is the pacing behind [`TrieDiagram::add_words_animated`], for hosts
/// that cannot hold the diagram across their own pauses.
pub struct WordBatch<I: Iterator> {
    words: core::iter::Peekable<I>,
    accepted: usize,
}

impl<I: Iterator> core::fmt::Debug for WordBatch<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WordBatch")
            .field("accepted", &self.accepted)
            .finish_non_exhaustive()
    }
}

impl<I, S> WordBatch<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    /// Starts a batch over `words`.
    pub fn new(words: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            words: words.into_iter().peekable(),
            accepted: 0,
        }
    }

    /// Ticks `diagram` to `now`, then inserts the next word, if any.
    pub fn step(&mut self, diagram: &mut TrieDiagram, now: Duration) -> BatchStep {
        diagram.tick(now);
        if let Some(word) = self.words.next()
            && diagram.add_word(word.as_ref())
        {
            self.accepted += 1;
        }
        if self.words.peek().is_some() {
            BatchStep::Pause
        } else {
            BatchStep::Done
        }
    }

    /// Words accepted so far.
    #[must_use]
    pub fn accepted(&self) -> usize {
        self.accepted
    }
}

/// Word and node counts of a diagram's trie.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DiagramStats {
    /// Number of distinct words.
    pub words: usize,
    /// Number of trie nodes, including the root.
    pub nodes: usize,
}

/// A trie and the animated tree diagram that shows it.
///
/// Every mutating operation that changes the trie runs one render pass,
/// which reconciles the retained scene against a fresh export of the trie
/// and starts transitions at the diagram's current time. Time only moves
/// when the host calls [`TrieDiagram::tick`].
#[derive(Debug)]
pub struct TrieDiagram {
    trie: Trie,
    config: DiagramConfig,
    palette: Palette,
    links: KeyedLayer<PrefixId, LinkElement>,
    nodes: KeyedLayer<PrefixId, NodeElement>,
    surface: Surface,
    now: Duration,
    last_render: RenderReport,
}

impl TrieDiagram {
    /// Creates an empty diagram with colors from `config` and defaults.
    #[must_use]
    pub fn new(config: DiagramConfig) -> Self {
        Self::with_theme(config, &NoTheme)
    }

    /// Creates an empty diagram, reading theme colors from `theme` once.
    #[must_use]
    pub fn with_theme<T: ThemeSource + ?Sized>(config: DiagramConfig, theme: &T) -> Self {
        Self {
            trie: Trie::new(),
            palette: Palette::resolve(&config.colors, theme),
            surface: Surface::fit(kurbo::Rect::ZERO, &config),
            config,
            links: KeyedLayer::new(),
            nodes: KeyedLayer::new(),
            now: Duration::ZERO,
            last_render: RenderReport::default(),
        }
    }

    /// The options this diagram was created with.
    #[must_use]
    #[inline]
    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    /// The resolved palette.
    #[must_use]
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The underlying trie.
    #[must_use]
    #[inline]
    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    /// Inserts `word`, rendering if it was accepted.
    ///
    /// Returns `false` for the empty string and for duplicates.
    pub fn add_word(&mut self, word: &str) -> bool {
        let accepted = self.trie.insert(word);
        if accepted {
            self.render();
        }
        accepted
    }

    /// Inserts every word, then renders once if any was accepted.
    ///
    /// Returns the number of accepted words.
    pub fn add_words<I, S>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut accepted = 0;
        for word in words {
            if self.trie.insert(word.as_ref()) {
                accepted += 1;
            }
        }
        if accepted > 0 {
            self.render();
        }
        accepted
    }

    /// Inserts and renders words one at a time, pausing between them.
    ///
    /// `sleep` is called with `delay` between consecutive words (never
    /// after the last one) and must resolve to the host clock once the
    /// pause is over; the diagram [`ticks`](Self::tick) to that time before
    /// the next word. This keeps the diagram independent of any particular
    /// timer or executor.
    ///
    /// Returns the number of accepted words.
    pub async fn add_words_animated<I, S, F, Fut>(
        &mut self,
        words: I,
        delay: Duration,
        mut sleep: F,
    ) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: FnMut(Duration) -> Fut,
        Fut: Future<Output = Duration>,
    {
        let mut batch = WordBatch::new(words);
        let mut now = self.now;
        loop {
            match batch.step(self, now) {
                BatchStep::Pause => now = sleep(delay).await,
                BatchStep::Done => return batch.accepted(),
            }
        }
    }

    /// Empties the trie and renders, so every node but the root exits.
    pub fn clear(&mut self) {
        self.trie.clear();
        self.render();
    }

    /// Emphasizes the root and every node along `prefix`, plus the links
    /// into them.
    ///
    /// Previous highlighting is cleared first. Prefixes that are not in the
    /// trie match nothing. The emphasis lasts until the next render pass or
    /// [`TrieDiagram::clear_highlights`].
    pub fn highlight_path(&mut self, prefix: &str) {
        self.clear_highlights();
        let (mut nodes, mut links) = (0_usize, 0_usize);
        for id in PrefixId::path_to(prefix) {
            if let Some(node) = self.nodes.get_mut(&id) {
                node.stroke_width = HIGHLIGHT_STROKE_WIDTH;
                nodes += 1;
            }
            if let Some(link) = self.links.get_mut(&id) {
                link.stroke_width = HIGHLIGHT_STROKE_WIDTH;
                links += 1;
            }
        }
        tracing::trace!(prefix, nodes, links, "highlighted path");
    }

    /// Restores every node and link to its normal stroke width.
    pub fn clear_highlights(&mut self) {
        for (_, node) in self.nodes.iter_mut() {
            node.stroke_width = node.rule_stroke_width();
        }
        for (_, link) in self.links.iter_mut() {
            link.stroke_width = LINK_STROKE_WIDTH;
        }
    }

    /// The accepted words in insertion order.
    #[must_use]
    pub fn words(&self) -> Vec<String> {
        self.trie.words()
    }

    /// Word and node counts.
    #[must_use]
    pub fn stats(&self) -> DiagramStats {
        DiagramStats {
            words: self.trie.word_count(),
            nodes: self.trie.node_count(),
        }
    }

    /// Advances the clock to `now` and drops elements whose exit finished.
    ///
    /// Times earlier than the current one are ignored.
    pub fn tick(&mut self, now: Duration) {
        if now > self.now {
            self.now = now;
        }
        let links = self.links.prune(self.now);
        let nodes = self.nodes.prune(self.now);
        if !links.is_empty() || !nodes.is_empty() {
            tracing::trace!(
                links = links.len(),
                nodes = nodes.len(),
                "removed exited elements"
            );
        }
    }

    /// The diagram's current time.
    #[must_use]
    #[inline]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Returns `true` while any transition runs or any element is exiting.
    ///
    /// Hosts use this to decide whether to keep requesting frames.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        let now = self.now;
        self.links.next_deadline().is_some()
            || self.nodes.next_deadline().is_some()
            || self.links.iter().any(|(_, l)| !l.is_settled(now))
            || self.nodes.iter().any(|(_, n)| !n.is_settled(now))
    }

    /// The surface computed by the last render pass.
    #[must_use]
    #[inline]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Number of render passes so far.
    #[must_use]
    #[inline]
    pub fn render_passes(&self) -> u64 {
        self.last_render.pass
    }

    /// What the last render pass changed.
    #[must_use]
    #[inline]
    pub fn last_render(&self) -> &RenderReport {
        &self.last_render
    }

    /// The node element for `id`, including exiting ones.
    #[must_use]
    pub fn node(&self, id: &PrefixId) -> Option<&NodeElement> {
        self.nodes.get(id)
    }

    /// The link element into `id`, including exiting ones.
    #[must_use]
    pub fn link(&self, id: &PrefixId) -> Option<&LinkElement> {
        self.links.get(id)
    }

    /// Node elements in paint order.
    pub fn nodes(&self) -> impl Iterator<Item = (&PrefixId, &NodeElement)> + '_ {
        self.nodes.iter()
    }

    /// Link elements in paint order.
    pub fn links(&self) -> impl Iterator<Item = (&PrefixId, &LinkElement)> + '_ {
        self.links.iter()
    }

    /// Returns `true` if `id` is on screen and fading out.
    #[must_use]
    pub fn is_exiting(&self, id: &PrefixId) -> bool {
        self.nodes.is_exiting(id)
    }

    /// Emits the current frame: links, then nodes, clipped to the surface.
    ///
    /// The returned resources stay alive on `backend` until released.
    pub fn paint<B: ImagingBackend>(&self, backend: &mut B) -> FrameResources {
        paint_scene(
            backend,
            &self.links,
            &self.nodes,
            &self.surface,
            &self.palette,
            self.now,
        )
    }

    /// The current frame as a standalone SVG document.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let mut svg = SvgBackend::default();
        let frame = self.paint(&mut svg);
        let doc = svg.to_svg_with_view_box(triescope_imaging::RectF::from_kurbo(
            self.surface.visible(),
        ));
        frame.release(&mut svg);
        doc
    }

    fn render(&mut self) {
        let pass = self.last_render.pass + 1;
        let report = render_pass(
            &self.trie,
            &self.config,
            &self.palette,
            &mut self.links,
            &mut self.nodes,
            self.now,
            pass,
        );
        self.surface = report.surface;
        self.last_render = report;
    }
}
