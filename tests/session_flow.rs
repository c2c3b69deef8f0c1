//! Whole-session behavior of the interaction core, driven tick by tick.

use std::time::Duration;

use finrings::config::Config;
use finrings::models::{CatalogData, ContentCatalog, LayerEntry, LayerId, OverviewEntry, Rgb};
use finrings::stage::{Animator, SceneGraph, Stage};

fn builtin_stage() -> Stage {
    Stage::new(ContentCatalog::builtin(), &Config::default())
}

fn layer(stage: &Stage, key: &str) -> LayerId {
    stage.catalog().layer_id(key).unwrap()
}

/// Advance in 10ms frames.
fn run(stage: &mut Stage, millis: u64) {
    for _ in 0..millis / 10 {
        stage.tick(Duration::from_millis(10));
    }
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn labels_shown_for(stage: &Stage, layer: LayerId) -> usize {
    stage
        .catalog()
        .sub_items_of(layer)
        .filter(|sub| stage.label_shown(*sub))
        .count()
}

#[test]
fn test_activate_twice_is_idempotent() {
    let mut stage = builtin_stage();
    let automation = layer(&stage, "automation");

    assert!(stage.activate(automation));
    let once = stage.snapshot();
    let tweens = stage.tweens().running();

    assert!(!stage.activate(automation));
    assert_eq!(stage.snapshot(), once);
    assert_eq!(stage.tweens().running(), tweens);
    assert_eq!(stage.reveals().pending().len(), 8);
}

#[test]
fn test_switch_layers_fully_deactivates_previous() {
    let mut stage = builtin_stage();
    let automation = layer(&stage, "automation");
    let cognitive = layer(&stage, "cognitive");

    stage.activate(automation);
    run(&mut stage, 3000);
    assert_eq!(labels_shown_for(&stage, automation), 2);

    stage.activate(cognitive);
    assert_eq!(stage.state().active_layer(), Some(cognitive));
    // Labels of the old layer go away at once
    assert_eq!(labels_shown_for(&stage, automation), 0);

    run(&mut stage, 1500);
    let snapshot = stage.snapshot();
    assert_eq!(snapshot.active_layer.as_deref(), Some("cognitive"));

    let old = &snapshot.layers[automation.index()];
    assert!(!old.visible);
    assert!(approx(old.opacity, 0.1));
    assert!(approx(old.emphasis, 0.3));
    for sub in stage.catalog().sub_items_of(automation) {
        assert!(approx(stage.scene().scale(stage.layout().point(sub)).x, 1.0));
    }

    let new = &snapshot.layers[cognitive.index()];
    assert!(new.visible);
    assert!(approx(new.opacity, 0.6));
    assert!(approx(new.emphasis, 0.8));
}

#[test]
fn test_reset_cancels_pending_reveals() {
    let mut stage = builtin_stage();
    let generative = layer(&stage, "generative");

    stage.activate(generative);
    run(&mut stage, 2500);
    assert_eq!(labels_shown_for(&stage, generative), 2);

    stage.reset();
    assert!(stage.state().is_idle());
    assert_eq!(stage.state().hovered(), None);
    assert!(stage.reveals().is_empty());

    run(&mut stage, 20_000);
    let snapshot = stage.snapshot();
    assert!(snapshot.labels_shown.is_empty());
    assert!(snapshot.pending_reveals.is_empty());
    assert!(snapshot.layers.iter().all(|l| !l.visible));
    assert_eq!(snapshot.camera.eye, [0.0, 8.0, 25.0]);
    assert_eq!(snapshot.camera.focus, [0.0, 0.0, 0.0]);
    assert_eq!(snapshot.panel.headline, "AI in Corporate Finance: The Future Unfolds");
}

#[test]
fn test_reset_from_idle_is_harmless() {
    let mut stage = builtin_stage();
    stage.reset();
    run(&mut stage, 1200);
    let snapshot = stage.snapshot();
    assert_eq!(snapshot.active_layer, None);
    assert_eq!(snapshot.camera.eye, [0.0, 8.0, 25.0]);
}

#[test]
fn test_hover_ignores_inactive_layer() {
    let mut stage = builtin_stage();
    let automation = layer(&stage, "automation");
    let cognitive = layer(&stage, "cognitive");

    stage.activate(automation);
    run(&mut stage, 600);
    stage.activate(cognitive);
    run(&mut stage, 100);

    // The old ring is still fading out, so its points can be hit
    assert!(stage.scene().is_visible(stage.layout().ring(automation)));

    let stale = stage.catalog().sub_items_of(automation).next().unwrap();
    let point = stage.layout().point(stale);
    let color_before = stage.scene().emissive(point);

    assert!(!stage.pointer_moved(&stage.ray_onto(stale)));
    assert_eq!(stage.state().hovered(), None);
    assert_eq!(stage.scene().outlined(), None);
    assert_eq!(stage.scene().emissive(point), color_before);
}

#[test]
fn test_outline_never_holds_more_than_one_item() {
    let mut stage = builtin_stage();
    let cognitive = layer(&stage, "cognitive");
    let color = stage.catalog().layer(cognitive).color;

    stage.activate(cognitive);
    run(&mut stage, 1000);

    let subs: Vec<_> = stage.catalog().sub_items_of(cognitive).collect();
    for (i, sub) in subs.iter().enumerate() {
        let ray = if i % 3 == 2 {
            stage.ray_away()
        } else {
            stage.ray_onto(*sub)
        };
        stage.pointer_moved(&ray);
        run(&mut stage, 50);

        match stage.state().hovered() {
            Some(hovered) => {
                assert_eq!(stage.scene().outlined(), Some(stage.layout().point(hovered)))
            }
            None => assert_eq!(stage.scene().outlined(), None),
        }

        let displaced = subs
            .iter()
            .filter(|s| stage.scene().emissive(stage.layout().point(**s)) != color)
            .count();
        assert!(displaced <= 1);
    }
}

#[test]
fn test_hover_highlights_and_reverts() {
    let mut stage = builtin_stage();
    let automation = layer(&stage, "automation");
    let original = stage.catalog().layer(automation).color;

    stage.activate(automation);
    run(&mut stage, 600);

    let sub = stage.catalog().sub_items_of(automation).nth(3).unwrap();
    let point = stage.layout().point(sub);

    assert!(stage.pointer_moved(&stage.ray_onto(sub)));
    assert_eq!(stage.state().hovered(), Some(sub));
    assert_eq!(stage.scene().emissive(point), Rgb::WHITE);
    assert_eq!(stage.scene().outlined(), Some(point));

    // Same target again changes nothing
    assert!(!stage.pointer_moved(&stage.ray_onto(sub)));

    run(&mut stage, 200);
    assert!(approx(stage.scene().scale(point).x, 1.2));

    assert!(stage.pointer_moved(&stage.ray_away()));
    assert_eq!(stage.state().hovered(), None);
    assert_eq!(stage.scene().emissive(point), original);
    assert_eq!(stage.scene().outlined(), None);

    run(&mut stage, 200);
    assert!(approx(stage.scene().scale(point).x, 1.0));
}

#[test]
fn test_switching_layers_clears_hover() {
    let mut stage = builtin_stage();
    let automation = layer(&stage, "automation");
    let generative = layer(&stage, "generative");
    let original = stage.catalog().layer(automation).color;

    stage.activate(automation);
    run(&mut stage, 600);
    let sub = stage.catalog().sub_items_of(automation).next().unwrap();
    stage.pointer_moved(&stage.ray_onto(sub));
    assert_eq!(stage.state().hovered(), Some(sub));

    stage.activate(generative);
    assert_eq!(stage.state().hovered(), None);
    assert_eq!(stage.scene().outlined(), None);
    assert_eq!(stage.scene().emissive(stage.layout().point(sub)), original);
}

#[test]
fn test_three_item_layer_reveals_at_fixed_increments() {
    let data = CatalogData {
        overview: OverviewEntry {
            headline: "Overview".into(),
            stats: vec![],
        },
        layers: vec![LayerEntry {
            key: "automation".into(),
            label: "Automation".into(),
            headline: "Automation".into(),
            description: "Rule-based work".into(),
            stats: vec!["**3** functions".into()],
            functions: vec!["Payables".into(), "Receivables".into(), "Close".into()],
            color: Rgb(0x4A90E2),
            emissive: Rgb(0x1A3A5A),
        }],
    };
    let mut stage = Stage::new(ContentCatalog::new(data).unwrap(), &Config::default());
    let automation = layer(&stage, "automation");

    assert!(stage.activate(automation));
    assert_eq!(stage.state().active_layer(), Some(automation));

    let delays: Vec<u64> = stage
        .snapshot()
        .pending_reveals
        .iter()
        .map(|r| r.delay_ms)
        .collect();
    assert_eq!(delays, vec![0, 2000, 4000]);

    run(&mut stage, 1990);
    assert_eq!(labels_shown_for(&stage, automation), 1);
    run(&mut stage, 20);
    assert_eq!(labels_shown_for(&stage, automation), 2);
    run(&mut stage, 2000);
    assert_eq!(labels_shown_for(&stage, automation), 3);
    assert!(stage.reveals().is_empty());
}

#[test]
fn test_revealed_label_pops_to_full_size() {
    let mut stage = builtin_stage();
    let cognitive = layer(&stage, "cognitive");
    stage.activate(cognitive);
    run(&mut stage, 10);

    let first = stage.layout().reveal_order(stage.catalog(), cognitive)[0];
    let label = stage.layout().point_label(first);
    assert!(stage.label_shown(first));
    assert!(stage.scene().scale(label).y < 0.7);

    run(&mut stage, 400);
    let size = stage.scene().scale(label);
    assert!(approx(size.x, 2.0) && approx(size.y, 0.7) && approx(size.z, 1.0));
}

#[test]
fn test_late_reveals_of_previous_layer_never_fire() {
    let mut stage = builtin_stage();
    let automation = layer(&stage, "automation");
    let cognitive = layer(&stage, "cognitive");

    stage.activate(automation);
    stage.activate(cognitive);
    assert!(stage
        .reveals()
        .pending()
        .iter()
        .all(|r| r.layer == cognitive));

    run(&mut stage, 17_000);
    assert_eq!(labels_shown_for(&stage, automation), 0);
    assert_eq!(labels_shown_for(&stage, cognitive), 8);
}

#[test]
fn test_reactivation_during_fade_keeps_ring() {
    let mut stage = builtin_stage();
    let automation = layer(&stage, "automation");
    let cognitive = layer(&stage, "cognitive");

    stage.activate(automation);
    run(&mut stage, 600);
    stage.activate(cognitive);
    run(&mut stage, 100);
    stage.activate(automation);
    run(&mut stage, 1000);

    let snapshot = stage.snapshot();
    let ring = &snapshot.layers[automation.index()];
    assert!(ring.visible);
    assert!(approx(ring.opacity, 0.6));
    assert!(!snapshot.layers[cognitive.index()].visible);
}
