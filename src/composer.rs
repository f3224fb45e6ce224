//! Creature Composition - Deterministic Figure Layout
//!
//! Every shape is positioned as a fraction of the canvas so the figure
//! scales uniformly across quality tiers. The seed namespaces definition
//! ids and appears in the caption; it does not perturb the layout, so two
//! calls with identical inputs produce byte-identical documents.

use rand::Rng;
use thiserror::Error;

use crate::features::{classify, FeatureSet};
use crate::species::{Dimensions, Quality, SpeciesInput, DEFAULT_COLOR_A, DEFAULT_COLOR_B};
use crate::svg::{Document, Element, Namespace};

/// Inclusive range for generated seeds when the caller supplies none.
pub const SEED_MIN: u64 = 1000;
pub const SEED_MAX: u64 = 9999;

const BACKGROUND_INNER: &str = "#1a1a2e";
const BACKGROUND_OUTER: &str = "#0f0f1e";
const FLAME_INNER: &str = "#FF6B35";
const FLAME_OUTER: &str = "#FF8C42";
const ICE_LEFT: &str = "#A8E6FF";
const ICE_RIGHT: &str = "#E0F7FF";

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Output of one composition: blended name, scene, canvas size, and the
/// effective seed (generated when the caller omitted one).
#[derive(Debug, Clone)]
pub struct CompositionResult {
    pub portmanteau: String,
    pub document: Document,
    pub dimensions: Dimensions,
    pub seed: u64,
}

/// Blended display name: first half of `a` joined with the second half of
/// `b`. Split points round down; the concatenation is purely positional.
pub fn portmanteau(a: &str, b: &str) -> String {
    let mid_a = a.chars().count() / 2;
    let mid_b = b.chars().count() / 2;
    a.chars().take(mid_a).chain(b.chars().skip(mid_b)).collect()
}

/// Stateless composer. Safe to share and invoke concurrently; each call is
/// a pure computation over its arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreatureComposer;

impl CreatureComposer {
    pub fn new() -> Self {
        Self
    }

    pub fn compose(
        &self,
        a: &SpeciesInput,
        b: &SpeciesInput,
        quality: Quality,
        seed: Option<u64>,
    ) -> Result<CompositionResult, ComposeError> {
        if a.name.is_empty() {
            return Err(ComposeError::InvalidInput("species 'a' is missing a name".into()));
        }
        if b.name.is_empty() {
            return Err(ComposeError::InvalidInput("species 'b' is missing a name".into()));
        }

        let seed = seed.unwrap_or_else(|| rand::rng().random_range(SEED_MIN..=SEED_MAX));
        let dimensions = quality.dimensions();
        let features = classify(&a.visual_hints, &b.visual_hints);
        let blended = portmanteau(&a.name, &b.name);

        let layout = Layout {
            w: f64::from(dimensions.width),
            h: f64::from(dimensions.height),
            color_a: a.primary_color(DEFAULT_COLOR_A).to_string(),
            color_b: b.primary_color(DEFAULT_COLOR_B).to_string(),
            ns: Namespace(seed),
        };

        let mut document = Document::new(dimensions.width, dimensions.height);
        for definition in layout.definitions() {
            document.define(definition);
        }

        document.push(layout.background());
        if features.has_mist {
            for blob in layout.mist() {
                document.push(blob);
            }
        }
        document.push(layout.body(&features));
        for caption in layout.captions(&blended, &a.name, &b.name, seed) {
            document.push(caption);
        }

        Ok(CompositionResult {
            portmanteau: blended,
            document,
            dimensions,
            seed,
        })
    }
}

/// Per-request layout context: canvas size, resolved palette, and the
/// definition namespace, threaded through every shape builder.
struct Layout {
    w: f64,
    h: f64,
    color_a: String,
    color_b: String,
    ns: Namespace,
}

impl Layout {
    fn definitions(&self) -> Vec<Element> {
        vec![
            Element::new("radialGradient")
                .attr("id", self.ns.id("bgGrad"))
                .child(stop("0%", BACKGROUND_INNER))
                .child(stop("100%", BACKGROUND_OUTER)),
            Element::new("linearGradient")
                .attr("id", self.ns.id("bodyGrad"))
                .attr("x1", "0%")
                .attr("y1", "0%")
                .attr("x2", "0%")
                .attr("y2", "100%")
                .child(stop("0%", &self.color_a))
                .child(stop("100%", &self.color_b)),
            blur_filter(self.ns.id("glow"), 8),
            blur_filter(self.ns.id("softGlow"), 4),
        ]
    }

    fn background(&self) -> Element {
        Element::new("rect")
            .attr("width", self.w)
            .attr("height", self.h)
            .attr("fill", self.ns.url("bgGrad"))
    }

    /// Two atmospheric blobs, one per species color, on opposite corners.
    fn mist(&self) -> Vec<Element> {
        let blob = |cx: f64, cy: f64, color: &str| {
            Element::new("circle")
                .attr("cx", cx)
                .attr("cy", cy)
                .attr("r", self.w * 0.2)
                .attr("fill", color)
                .attr("opacity", 0.15)
                .attr("filter", self.ns.url("glow"))
        };
        vec![
            blob(self.w * 0.3, self.h * 0.3, &self.color_a),
            blob(self.w * 0.7, self.h * 0.7, &self.color_b),
        ]
    }

    /// The creature group, anchored slightly below canvas center. Children
    /// are ordered back to front; optional motifs layer atop the core
    /// figure in a fixed order.
    fn body(&self, features: &FeatureSet) -> Element {
        let mut group = Element::new("g")
            .attr("transform", format!("translate({} {})", self.w * 0.5, self.h * 0.55))
            .children(self.core_figure());

        let motifs: [(bool, fn(&Self) -> Vec<Element>); 5] = [
            (features.has_wings, Self::wings),
            (features.has_spikes, Self::spikes),
            (features.has_glow, Self::glow_halo),
            (features.has_flames, Self::flames),
            (features.has_ice, Self::ice_crystals),
        ];
        for (active, build) in motifs {
            if active {
                group = group.children(build(self));
            }
        }
        group
    }

    fn core_figure(&self) -> Vec<Element> {
        let (w, h) = (self.w, self.h);
        let mut shapes = vec![
            // Torso and head share the vertical body gradient.
            ellipse(0.0, 0.0, w * 0.18, h * 0.25)
                .attr("fill", self.ns.url("bodyGrad"))
                .attr("stroke", &self.color_a)
                .attr("stroke-width", 3)
                .attr("filter", self.ns.url("softGlow"))
                .attr("opacity", 0.95),
            ellipse(0.0, -h * 0.28, w * 0.15, h * 0.15)
                .attr("fill", self.ns.url("bodyGrad"))
                .attr("stroke", &self.color_b)
                .attr("stroke-width", 3)
                .attr("filter", self.ns.url("softGlow")),
        ];

        // Eyes, pupils, highlights.
        for sign in [-1.0, 1.0] {
            shapes.push(
                ellipse(sign * w * 0.06, -h * 0.3, w * 0.04, h * 0.05)
                    .attr("fill", "white")
                    .attr("opacity", 0.95),
            );
        }
        for sign in [-1.0, 1.0] {
            shapes.push(circle(sign * w * 0.06, -h * 0.29, w * 0.02).attr("fill", "black"));
        }
        shapes.push(
            circle(-w * 0.055, -h * 0.305, w * 0.008)
                .attr("fill", "white")
                .attr("opacity", 0.8),
        );
        shapes.push(
            circle(w * 0.065, -h * 0.305, w * 0.008)
                .attr("fill", "white")
                .attr("opacity", 0.8),
        );

        shapes.push(
            Element::new("path")
                .attr(
                    "d",
                    format!(
                        "M {} {} Q 0 {} {} {}",
                        -w * 0.05,
                        -h * 0.24,
                        -h * 0.22,
                        w * 0.05,
                        -h * 0.24
                    ),
                )
                .attr("stroke", &self.color_b)
                .attr("stroke-width", 2)
                .attr("fill", "none")
                .attr("opacity", 0.8),
        );

        // Arms tilt outward with opposite color assignment.
        shapes.push(self.arm(-1.0, &self.color_a, &self.color_b));
        shapes.push(self.arm(1.0, &self.color_b, &self.color_a));

        shapes.push(self.leg(-1.0, &self.color_a, &self.color_b));
        shapes.push(self.leg(1.0, &self.color_b, &self.color_a));

        shapes
    }

    fn arm(&self, sign: f64, fill: &str, stroke: &str) -> Element {
        let (cx, cy) = (sign * self.w * 0.2, -self.h * 0.05);
        ellipse(cx, cy, self.w * 0.06, self.h * 0.15)
            .attr("fill", fill)
            .attr("stroke", stroke)
            .attr("stroke-width", 2)
            .attr("transform", format!("rotate({} {cx} {cy})", sign * 20.0))
            .attr("opacity", 0.9)
    }

    fn leg(&self, sign: f64, fill: &str, stroke: &str) -> Element {
        ellipse(sign * self.w * 0.08, self.h * 0.22, self.w * 0.07, self.h * 0.08)
            .attr("fill", fill)
            .attr("stroke", stroke)
            .attr("stroke-width", 2)
            .attr("opacity", 0.9)
    }

    fn wings(&self) -> Vec<Element> {
        let wing = |sign: f64, color: &str| {
            let (cx, cy) = (sign * self.w * 0.25, -self.h * 0.15);
            ellipse(cx, cy, self.w * 0.12, self.h * 0.2)
                .attr("fill", color)
                .attr("opacity", 0.4)
                .attr("transform", format!("rotate({} {cx} {cy})", sign * 30.0))
        };
        vec![wing(-1.0, &self.color_a), wing(1.0, &self.color_b)]
    }

    /// Head spike plus one triangle on each shoulder.
    fn spikes(&self) -> Vec<Element> {
        let (w, h) = (self.w, self.h);
        vec![
            polygon(
                &[(0.0, -h * 0.42), (-w * 0.03, -h * 0.38), (w * 0.03, -h * 0.38)],
                &self.color_a,
            ),
            polygon(
                &[(-w * 0.15, -h * 0.1), (-w * 0.18, -h * 0.05), (-w * 0.12, -h * 0.05)],
                &self.color_b,
            ),
            polygon(
                &[(w * 0.15, -h * 0.1), (w * 0.18, -h * 0.05), (w * 0.12, -h * 0.05)],
                &self.color_a,
            ),
        ]
    }

    fn glow_halo(&self) -> Vec<Element> {
        vec![circle(0.0, -self.h * 0.15, self.w * 0.25)
            .attr("fill", &self.color_a)
            .attr("opacity", 0.1)
            .attr("filter", self.ns.url("glow"))]
    }

    fn flames(&self) -> Vec<Element> {
        let flame = |sign: f64, color: &str| {
            ellipse(sign * self.w * 0.1, -self.h * 0.4, self.w * 0.03, self.h * 0.06)
                .attr("fill", color)
                .attr("opacity", 0.7)
                .attr("filter", self.ns.url("softGlow"))
        };
        vec![flame(-1.0, FLAME_INNER), flame(1.0, FLAME_OUTER)]
    }

    fn ice_crystals(&self) -> Vec<Element> {
        let (w, h) = (self.w, self.h);
        vec![
            polygon(
                &[(-w * 0.12, -h * 0.35), (-w * 0.1, -h * 0.32), (-w * 0.14, -h * 0.32)],
                ICE_LEFT,
            ),
            polygon(
                &[(w * 0.12, -h * 0.35), (w * 0.1, -h * 0.32), (w * 0.14, -h * 0.32)],
                ICE_RIGHT,
            ),
        ]
    }

    fn captions(&self, title: &str, name_a: &str, name_b: &str, seed: u64) -> Vec<Element> {
        let text = |y: &'static str, size: f64, fill: &str| {
            Element::new("text")
                .attr("x", "50%")
                .attr("y", y)
                .attr("text-anchor", "middle")
                .attr("font-size", size)
                .attr("fill", fill)
                .attr("font-family", "Arial, sans-serif")
        };
        vec![
            text("10%", self.w * 0.06, "white")
                .attr("font-weight", "bold")
                .attr("filter", self.ns.url("softGlow"))
                .text(title),
            text("92%", self.w * 0.035, "rgba(255,255,255,0.8)")
                .text(format!("{name_a} + {name_b}")),
            text("96%", self.w * 0.025, "rgba(255,255,255,0.5)")
                .text(format!("Seed: {seed}")),
        ]
    }
}

fn stop(offset: &str, color: &str) -> Element {
    Element::new("stop")
        .attr("offset", offset)
        .attr("stop-color", color)
        .attr("stop-opacity", 1)
}

fn blur_filter(id: String, std_deviation: u32) -> Element {
    Element::new("filter").attr("id", id).child(
        Element::new("feGaussianBlur")
            .attr("stdDeviation", std_deviation)
            .attr("result", "coloredBlur"),
    )
    .child(
        Element::new("feMerge")
            .child(Element::new("feMergeNode").attr("in", "coloredBlur"))
            .child(Element::new("feMergeNode").attr("in", "SourceGraphic")),
    )
}

fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64) -> Element {
    Element::new("ellipse")
        .attr("cx", cx)
        .attr("cy", cy)
        .attr("rx", rx)
        .attr("ry", ry)
}

fn circle(cx: f64, cy: f64, r: f64) -> Element {
    Element::new("circle").attr("cx", cx).attr("cy", cy).attr("r", r)
}

fn polygon(points: &[(f64, f64)], fill: &str) -> Element {
    let points = points
        .iter()
        .map(|(x, y)| format!("{x},{y}"))
        .collect::<Vec<_>>()
        .join(" ");
    Element::new("polygon")
        .attr("points", points)
        .attr("fill", fill)
        .attr("opacity", 0.8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn species(name: &str, colors: &[&str], hints: &[&str]) -> SpeciesInput {
        SpeciesInput {
            name: name.to_string(),
            colors: colors.iter().map(|c| c.to_string()).collect(),
            visual_hints: hints.iter().map(|h| h.to_string()).collect(),
        }
    }

    #[test]
    fn portmanteau_splits_positionally() {
        assert_eq!(portmanteau("Ember", "Frost"), "Emost");
        assert_eq!(portmanteau("Wisp", "Moth"), "With");
    }

    #[test]
    fn portmanteau_handles_empty_and_odd_names() {
        assert_eq!(portmanteau("", "Frost"), "ost");
        assert_eq!(portmanteau("Ember", ""), "Em");
        assert_eq!(portmanteau("", ""), "");
        // Odd lengths round the split point down.
        assert_eq!(portmanteau("Imp", "Imp"), "Imp");
    }

    #[test]
    fn portmanteau_counts_chars_not_bytes() {
        assert_eq!(portmanteau("Åska", "Öga"), "Åsga");
    }

    #[test]
    fn missing_name_is_rejected() {
        let composer = CreatureComposer::new();
        let named = species("Ember", &[], &[]);
        let unnamed = species("", &[], &[]);

        let err = composer
            .compose(&unnamed, &named, Quality::Med, Some(1))
            .unwrap_err();
        assert!(matches!(err, ComposeError::InvalidInput(_)));
        assert!(err.to_string().contains("species 'a'"));

        let err = composer
            .compose(&named, &unnamed, Quality::Med, Some(1))
            .unwrap_err();
        assert!(err.to_string().contains("species 'b'"));
    }

    #[test]
    fn composition_is_deterministic_given_a_seed() {
        let composer = CreatureComposer::new();
        let a = species("Ember", &["#FF0000"], &["flame wreath"]);
        let b = species("Frost", &["#00FFFF"], &["icy mist"]);

        let first = composer.compose(&a, &b, Quality::High, Some(7)).unwrap();
        let second = composer.compose(&a, &b, Quality::High, Some(7)).unwrap();
        assert_eq!(first.document.to_markup(), second.document.to_markup());
        assert_eq!(first.portmanteau, "Emost");
        assert_eq!(first.seed, 7);
    }

    #[test]
    fn omitted_seed_is_generated_in_range() {
        let composer = CreatureComposer::new();
        let a = species("Ember", &[], &[]);
        let b = species("Frost", &[], &[]);
        for _ in 0..32 {
            let result = composer.compose(&a, &b, Quality::Low, None).unwrap();
            assert!((SEED_MIN..=SEED_MAX).contains(&result.seed));
        }
    }

    #[test]
    fn empty_palettes_fall_back_to_default_colors() {
        let composer = CreatureComposer::new();
        let a = species("Ember", &[], &[]);
        let b = species("Frost", &[], &[]);
        let markup = composer
            .compose(&a, &b, Quality::Med, Some(3))
            .unwrap()
            .document
            .to_markup();
        assert!(markup.contains(DEFAULT_COLOR_A));
        assert!(markup.contains(DEFAULT_COLOR_B));
    }

    #[test]
    fn definition_ids_are_namespaced_by_seed() {
        let composer = CreatureComposer::new();
        let a = species("Ember", &[], &[]);
        let b = species("Frost", &[], &[]);
        let markup = composer
            .compose(&a, &b, Quality::Med, Some(4242))
            .unwrap()
            .document
            .to_markup();
        for base in ["bgGrad", "bodyGrad", "glow", "softGlow"] {
            assert!(markup.contains(&format!(r#"id="{base}4242""#)), "missing {base}");
        }
        assert!(markup.contains("url(#bodyGrad4242)"));
    }

    #[test]
    fn captions_center_title_names_and_seed() {
        let composer = CreatureComposer::new();
        let a = species("Ember", &[], &[]);
        let b = species("Frost", &[], &[]);
        let markup = composer
            .compose(&a, &b, Quality::Low, Some(99))
            .unwrap()
            .document
            .to_markup();
        assert!(markup.contains(">Emost</text>"));
        assert!(markup.contains(">Ember + Frost</text>"));
        assert!(markup.contains(">Seed: 99</text>"));
    }
}
