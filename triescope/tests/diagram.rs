// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Behavior of `TrieDiagram` across render passes.

use std::collections::BTreeMap;
use std::time::Duration;

use kurbo::Point;
use peniko::Color;
use triescope_imaging_svg::SvgBackend;
use triescope::{
    DiagramConfig, HIGHLIGHT_STROKE_WIDTH, LINK_STROKE_WIDTH, NODE_STROKE_WIDTH, Palette,
    PaletteOverrides, PrefixId, ROOT_STROKE_WIDTH, RING_OPACITY, TrieDiagram,
};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn id(prefix: &str) -> PrefixId {
    PrefixId::from(prefix)
}

fn diagram() -> TrieDiagram {
    TrieDiagram::new(DiagramConfig::default())
}

#[test]
fn batch_insert_is_one_render_pass() {
    let mut d = diagram();
    assert_eq!(d.add_words(["the", "there", "their"]), 3);
    assert_eq!(d.render_passes(), 1);

    let report = d.last_render();
    let mut entered: Vec<&str> = report.nodes.enter.iter().map(PrefixId::as_str).collect();
    entered.sort_unstable();
    assert_eq!(
        entered,
        ["", "t", "th", "the", "thei", "their", "ther", "there"]
    );
    assert_eq!(report.links.enter.len(), 7);
    assert!(report.nodes.update.is_empty());
}

#[test]
fn batch_of_rejected_words_does_not_render() {
    let mut d = diagram();
    d.add_word("a");
    assert_eq!(d.add_words(["", "a"]), 0);
    assert_eq!(d.render_passes(), 1);
}

#[test]
fn highlight_follows_the_prefix_only() {
    let mut d = diagram();
    d.add_words(["car", "cart"]);
    d.highlight_path("car");

    for prefix in ["", "c", "ca", "car"] {
        let node = d.node(&id(prefix)).unwrap();
        assert_eq!(node.stroke_width(), HIGHLIGHT_STROKE_WIDTH, "node {prefix:?}");
    }
    assert_eq!(d.node(&id("cart")).unwrap().stroke_width(), NODE_STROKE_WIDTH);

    for prefix in ["c", "ca", "car"] {
        assert!(d.link(&id(prefix)).unwrap().is_highlighted(), "link {prefix:?}");
    }
    assert_eq!(d.link(&id("cart")).unwrap().stroke_width(), LINK_STROKE_WIDTH);
}

#[test]
fn highlight_of_missing_prefix_only_marks_existing_nodes() {
    let mut d = diagram();
    d.add_word("dog");
    d.highlight_path("dot");
    assert!(d.node(&id("do")).unwrap().is_highlighted());
    assert!(!d.node(&id("dog")).unwrap().is_highlighted());
    assert!(d.node(&id("dot")).is_none());
}

#[test]
fn clear_highlights_restores_rule_widths() {
    let mut d = diagram();
    d.add_words(["car", "cart"]);
    d.highlight_path("cart");
    d.clear_highlights();

    assert_eq!(d.node(&PrefixId::Root).unwrap().stroke_width(), ROOT_STROKE_WIDTH);
    for (key, node) in d.nodes().filter(|(k, _)| **k != PrefixId::Root) {
        assert_eq!(node.stroke_width(), NODE_STROKE_WIDTH, "node {key}");
    }
    assert!(d.links().all(|(_, l)| l.stroke_width() == LINK_STROKE_WIDTH));
}

#[test]
fn highlight_replaces_the_previous_one() {
    let mut d = diagram();
    d.add_words(["ab", "cd"]);
    d.highlight_path("ab");
    d.highlight_path("cd");
    assert!(!d.node(&id("ab")).unwrap().is_highlighted());
    assert!(d.node(&id("cd")).unwrap().is_highlighted());
}

#[test]
fn render_pass_drops_highlighting() {
    let mut d = diagram();
    d.add_word("car");
    d.highlight_path("car");
    d.add_word("cab");
    assert!(d.nodes().all(|(_, n)| !n.is_highlighted()));
    assert!(d.links().all(|(_, l)| !l.is_highlighted()));
}

#[test]
fn nodes_fade_in_over_the_duration() {
    let mut d = diagram();
    d.add_word("a");
    let a = id("a");
    assert_eq!(d.node(&a).unwrap().opacity(d.now()), 0.0);
    assert!(d.is_animating());

    d.tick(ms(200));
    let halfway = d.node(&a).unwrap().opacity(d.now());
    assert!(halfway > 0.0 && halfway < 1.0);

    d.tick(ms(400));
    assert_eq!(d.node(&a).unwrap().opacity(d.now()), 1.0);
    assert!(!d.is_animating());
}

#[test]
fn layout_positions_follow_spacing_and_level_height() {
    let mut d = diagram();
    d.add_words(["ab", "ac"]);
    assert_eq!(d.node(&PrefixId::Root).unwrap().target_position(), Point::ZERO);
    assert_eq!(d.node(&id("a")).unwrap().target_position(), Point::new(0.0, 80.0));
    assert_eq!(d.node(&id("ab")).unwrap().target_position(), Point::new(-25.0, 160.0));
    assert_eq!(d.node(&id("ac")).unwrap().target_position(), Point::new(25.0, 160.0));
}

#[test]
fn surviving_nodes_move_from_where_they_are() {
    let mut d = diagram();
    d.add_word("a");
    d.tick(ms(1000));
    d.add_word("b");

    let a = d.node(&id("a")).unwrap();
    assert_eq!(a.position(d.now()), Point::new(0.0, 80.0));
    assert_eq!(a.target_position(), Point::new(-25.0, 80.0));
    assert_eq!(d.last_render().nodes.update.len(), 2);

    d.tick(ms(1400));
    let a = d.node(&id("a")).unwrap();
    assert_eq!(a.position(d.now()), Point::new(-25.0, 80.0));
}

#[test]
fn surviving_links_follow_their_endpoints() {
    let mut d = diagram();
    d.add_word("a");
    d.tick(ms(1000));
    d.add_word("b");

    let a = d.link(&id("a")).unwrap();
    assert_eq!(a.source(d.now()), Point::ZERO);
    assert_eq!(a.target(d.now()), Point::new(0.0, 80.0));
    assert_eq!(a.opacity(d.now()), 1.0);
    assert_eq!(d.last_render().links.update, [id("a")]);

    d.tick(ms(1200));
    let mid = d.link(&id("a")).unwrap().target(d.now());
    assert!(mid.x < 0.0 && mid.x > -25.0, "target at {mid:?}");
    assert_eq!(mid.y, 80.0);

    d.tick(ms(1400));
    let a = d.link(&id("a")).unwrap();
    assert_eq!(a.target(d.now()), Point::new(-25.0, 80.0));
    assert_eq!(a.source(d.now()), Point::ZERO);
}

#[test]
fn new_links_fade_in_at_their_final_place() {
    let mut d = diagram();
    d.add_word("a");
    d.tick(ms(1000));
    d.add_word("b");

    let b = d.link(&id("b")).unwrap();
    assert_eq!(d.last_render().links.enter, [id("b")]);
    assert_eq!(b.opacity(d.now()), 0.0);
    assert_eq!(b.source(d.now()), Point::ZERO);
    assert_eq!(b.target(d.now()), Point::new(25.0, 80.0));

    d.tick(ms(1200));
    let halfway = d.link(&id("b")).unwrap().opacity(d.now());
    assert!(halfway > 0.0 && halfway < 1.0);

    d.tick(ms(1400));
    assert_eq!(d.link(&id("b")).unwrap().opacity(d.now()), 1.0);
}

#[test]
fn links_exit_in_half_the_duration() {
    let mut d = diagram();
    d.add_word("ab");
    d.tick(ms(1000));
    d.clear();

    d.tick(ms(1100));
    let fading = d.link(&id("ab")).unwrap().opacity(d.now());
    assert!(fading > 0.0 && fading < 1.0);
    assert_eq!(d.links().count(), 2);

    d.tick(ms(1200));
    assert!(d.link(&id("a")).is_none());
    assert!(d.link(&id("ab")).is_none());
}

#[test]
fn clear_exits_everything_but_the_root() {
    let mut d = diagram();
    d.add_words(["cat", "car"]);
    d.tick(ms(1000));
    d.clear();

    let report = d.last_render();
    assert_eq!(report.nodes.exit.len(), 4);
    assert_eq!(report.links.exit.len(), 4);
    assert_eq!(report.nodes.update, [PrefixId::Root]);
    assert!(d.is_exiting(&id("cat")));
    assert_eq!(d.stats().words, 0);

    d.tick(ms(1199));
    assert_eq!(d.nodes().count(), 5);
    d.tick(ms(1200));
    assert_eq!(d.nodes().count(), 1);
    assert_eq!(d.links().count(), 0);
    // The root keeps its own update transition a little longer.
    d.tick(ms(1400));
    assert!(!d.is_animating());
}

#[test]
fn re_added_word_revives_exiting_elements() {
    let mut d = diagram();
    d.add_word("ab");
    d.tick(ms(1000));
    d.clear();
    d.tick(ms(1100));
    assert!(d.add_word("ab"));

    let report = d.last_render();
    assert!(report.nodes.enter.is_empty());
    assert!(!d.is_exiting(&id("ab")));
    assert_eq!(d.nodes().count(), 3);

    d.tick(ms(5000));
    assert_eq!(d.nodes().count(), 3);
    assert_eq!(d.node(&id("ab")).unwrap().opacity(d.now()), 1.0);
}

#[test]
fn ring_is_present_iff_terminal() {
    let mut d = diagram();
    d.add_word("car");
    assert!(d.node(&id("car")).unwrap().ring().is_some());
    assert!(d.node(&id("ca")).unwrap().ring().is_none());
    assert!(d.node(&PrefixId::Root).unwrap().ring().is_none());

    d.tick(ms(1000));
    d.add_word("ca");
    let ring = d.node(&id("ca")).unwrap().ring().unwrap();
    assert_eq!(ring.opacity(d.now()), 0.0);
    d.tick(ms(1400));
    let ring = d.node(&id("ca")).unwrap().ring().unwrap();
    assert_eq!(ring.opacity(d.now()), RING_OPACITY);
}

#[test]
fn colors_follow_the_node_rule() {
    let mut d = diagram();
    d.add_word("ab");
    let p = *d.palette();

    let root = d.node(&PrefixId::Root).unwrap();
    assert_eq!(root.target_colors().0, p.muted_text);
    assert_eq!(root.target_colors().1, p.muted_text);
    assert_eq!(root.label(), None);

    let internal = d.node(&id("a")).unwrap();
    assert_eq!(internal.target_colors(), (p.background, p.accent, p.text));
    assert_eq!(internal.label(), Some("a"));

    let terminal = d.node(&id("ab")).unwrap();
    assert_eq!(terminal.target_colors(), (p.accent, p.accent, p.label));
    assert_eq!(terminal.radius(d.now()), 18.0);
    assert_eq!(root.radius(d.now()), 9.0);
}

#[test]
fn node_turning_terminal_recolors() {
    let mut d = diagram();
    d.add_word("ab");
    d.tick(ms(1000));
    d.add_word("a");
    let p = *d.palette();
    let a = d.node(&id("a")).unwrap();
    assert_eq!(a.fill(d.now()), p.background);
    assert_eq!(a.target_colors().0, p.accent);
}

#[test]
fn surface_height_is_capped() {
    let mut d = TrieDiagram::new(DiagramConfig::default().with_max_height(200.0));
    d.add_word("abcdefghij");
    let surface = *d.surface();
    assert_eq!(surface.height(), 200.0);
    assert!(surface.is_clipped());
    assert!(surface.view_box().height() > 200.0);
    assert!(d.to_svg().contains("height=\"200\""));
}

#[test]
fn svg_has_two_circles_per_node_and_one_per_ring() {
    let mut d = diagram();
    d.add_words(["cat", "car", "card"]);
    d.tick(ms(1000));
    let svg = d.to_svg();
    assert_eq!(svg.matches("<circle ").count(), 6 * 2 + 3);
    assert_eq!(svg.matches("<path ").count(), 5);
    assert_eq!(svg.matches("<text ").count(), 5);
}

#[test]
fn svg_uses_palette_colors() {
    let mut d = diagram();
    d.add_words(["cat", "car", "card"]);
    d.tick(ms(1000));
    let svg = d.to_svg();

    // One stroked path per link, in the border color.
    assert_eq!(svg.matches(r##"fill="none" stroke="#e5e7eb""##).count(), 5);
    // Terminal nodes are filled with the accent; "car" and "card" also
    // carry an accent ring.
    assert_eq!(svg.matches(r##"fill="#6366f1""##).count(), 3);
    assert!(svg.contains(r##"stroke="#6366f1""##));
    // The root is drawn in the muted text color; labels in text or label.
    assert!(svg.contains(r##"fill="#6b7280""##));
    assert!(svg.contains(r##"fill="#1f2937""##));
    assert!(svg.contains(r##"fill="#ffffff""##));
    assert!(!svg.contains("#000000"));
}

#[test]
fn frame_resources_outlive_export_until_released() {
    let mut d = diagram();
    d.add_words(["ab", "ac"]);
    let mut backend = SvgBackend::default();
    let frame = d.paint(&mut backend);
    assert_eq!(backend.to_svg(10, 10).matches("<path ").count(), 3);

    frame.release(&mut backend);
    // The ops remain recorded but their paths no longer resolve.
    assert!(!backend.ops().is_empty());
    assert!(!backend.to_svg(10, 10).contains("<path "));
}

#[test]
fn theme_colors_apply_unless_overridden() {
    let theme: BTreeMap<String, String> = [
        ("--accent".to_string(), "#ff0000".to_string()),
        ("--background".to_string(), "#000000".to_string()),
    ]
    .into_iter()
    .collect();
    let config = DiagramConfig::default().with_colors(PaletteOverrides {
        background: Some(Color::from_rgb8(1, 2, 3)),
        ..PaletteOverrides::default()
    });
    let d = TrieDiagram::with_theme(config, &theme);
    assert_eq!(
        d.palette().accent.to_rgba8(),
        Color::from_rgb8(255, 0, 0).to_rgba8()
    );
    assert_eq!(d.palette().background, Color::from_rgb8(1, 2, 3));
    assert_eq!(d.palette().border, Palette::default().border);
}

#[test]
fn animated_batch_sleeps_between_words() {
    let mut d = diagram();
    let mut slept = Vec::new();
    let mut clock = Duration::ZERO;
    let accepted = pollster::block_on(d.add_words_animated(
        ["a", "b", "a", "c"],
        triescope::DEFAULT_ANIMATION_DELAY,
        |delay| {
            slept.push(delay);
            clock += delay;
            core::future::ready(clock)
        },
    ));

    assert_eq!(accepted, 3);
    assert_eq!(slept, [ms(500); 3]);
    assert_eq!(d.render_passes(), 3);
    assert_eq!(d.now(), ms(1500));
    assert_eq!(d.words(), ["a", "b", "c"]);
    // "a" entered at 0 and has long finished fading in.
    assert_eq!(d.node(&id("a")).unwrap().opacity(d.now()), 1.0);
}

#[test]
fn stats_and_words_mirror_the_trie() {
    let mut d = diagram();
    assert_eq!(d.stats().nodes, 1);
    d.add_words(["cat", "car", "card"]);
    let stats = d.stats();
    assert_eq!((stats.words, stats.nodes), (3, 6));
    assert_eq!(d.words(), ["cat", "car", "card"]);
}
