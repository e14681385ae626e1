//! The landing page presentation tree.
//!
//! [`render_document`] is pure composition: it lays out every section of
//! [`PageContent`] and applies the animation values captured in a
//! [`PageFrame`]. No timing or pointer logic lives here.

use pizzafun_motion_core::keyframes::KeyframeTrack;
use pizzafun_page_model::content::{anchor_id, HeroStat, MilestoneStatus, PageContent};
use pizzafun_reveal_engine::{format_thousands, GlyphState};
use serde::Serialize;

use crate::charts::{area_chart, pie_chart, wave};
use crate::node::{Element, Node};

/// Pulse rings around each hero stat card.
pub const PULSE_RING_COUNT: usize = 3;

/// Diameter (px) of a stat card's pulse rings.
const PULSE_RING_SIZE_PX: u32 = 60;

/// Transform of a magnetic button at rest.
pub const NEUTRAL_MAGNETIC: &str =
    "translate3d(0.000px, 0.000px, 0px) rotateX(0.000deg) rotateY(0.000deg) scale(1.0000)";

/// Transform of a holographic card at rest.
pub const NEUTRAL_TILT: &str =
    "perspective(1000px) rotateX(0.000deg) rotateY(0.000deg) scale(1.0000)";

/// One hero statistic as shown on this frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterFrame {
    pub label: String,
    pub icon: String,
    pub value: u64,
    pub target: u64,
    /// Formatted value plus suffix, e.g. `35,000TPS`.
    pub text: String,
    pub glitching: bool,
}

/// A background particle as drawn on this frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleSprite {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
    pub scale: f64,
}

/// Values of a looping decoration on this frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pulse {
    pub scale: f64,
    pub opacity: f64,
}

/// Everything animated on the page, frozen at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageFrame {
    pub time_secs: f64,
    /// Visible prefix of the hero kicker.
    pub kicker: String,
    /// Glyphs of each headline line.
    pub headline: Vec<Vec<GlyphState>>,
    pub counters: Vec<CounterFrame>,
    /// Transforms of the hero call-to-action buttons.
    pub cta_transforms: Vec<String>,
    /// Tilt of the hero stat cards.
    pub stat_transforms: Vec<String>,
    /// Tilt of the feature cards.
    pub card_transforms: Vec<String>,
    /// Tilt of the performance chart card.
    pub chart_transform: String,
    /// Tilt of the tokenomics card.
    pub tokenomics_transform: String,
    /// Tilt of the roadmap milestone cards.
    pub roadmap_transforms: Vec<String>,
    /// Follower dot transform, absent while the pointer is off the page.
    pub follower: Option<String>,
    /// Grid background transform.
    pub background: String,
    /// Whether the compact navigation menu is expanded.
    pub menu_open: bool,
    pub particles: Vec<ParticleSprite>,
    /// Rings around every stat card, in ring order.
    pub pulse_rings: Vec<Pulse>,
    /// Header call-to-action glow radius (px) and alpha.
    pub glow: (f64, f64),
    /// Inner glow shared by every holographic card.
    pub holo_glow: Pulse,
    /// Stat icon spin (deg) and scale.
    pub stat_icon: (f64, f64),
    /// Headline bolt rotation (deg) and scale.
    pub bolt: (f64, f64),
    /// Wave blend between its two outlines, in `[0, 1]`.
    pub wave: f64,
    /// Feature icon bob: vertical offset (px) and X rotation (deg).
    pub feature_icons: Vec<(f64, f64)>,
    /// Roadmap dot pulse: shadow spread (px) and alpha.
    pub roadmap_pulses: Vec<(f64, f64)>,
}

impl PageFrame {
    /// The page with every reveal finished and every spring at rest.
    pub fn settled(content: &PageContent) -> Self {
        let headline = content
            .hero
            .headline
            .iter()
            .map(|line| {
                line.text
                    .chars()
                    .map(|ch| GlyphState {
                        ch: if ch == ' ' { '\u{a0}' } else { ch },
                        opacity: 1.0,
                        offset_y: 0.0,
                        rotate_x: 0.0,
                    })
                    .collect()
            })
            .collect();
        let counters = content
            .hero
            .stats
            .iter()
            .map(|stat| {
                let target = stat.target().unwrap_or_default();
                CounterFrame::new(stat, target, target, false)
            })
            .collect();
        let tilt = |count: usize| vec![NEUTRAL_TILT.to_string(); count];

        let mut frame = Self {
            time_secs: 0.0,
            kicker: content.hero.kicker.clone(),
            headline,
            counters,
            cta_transforms: vec![NEUTRAL_MAGNETIC.to_string(); 2],
            stat_transforms: tilt(content.hero.stats.len()),
            card_transforms: tilt(content.features.features.len()),
            chart_transform: NEUTRAL_TILT.to_string(),
            tokenomics_transform: NEUTRAL_TILT.to_string(),
            roadmap_transforms: tilt(content.roadmap.milestones.len()),
            follower: None,
            background: "translateY(0.000%) scale(1.0000)".to_string(),
            menu_open: false,
            particles: Vec::new(),
            pulse_rings: Vec::new(),
            glow: (0.0, 0.0),
            holo_glow: Pulse {
                scale: 1.0,
                opacity: 0.0,
            },
            stat_icon: (0.0, 1.0),
            bolt: (0.0, 1.0),
            wave: 0.0,
            feature_icons: Vec::new(),
            roadmap_pulses: Vec::new(),
        };
        frame.apply_ambient(content, 0.0);
        frame
    }

    /// Fill in the looping decorations for `t_secs` after mount.
    pub fn apply_ambient(&mut self, content: &PageContent, t_secs: f64) {
        self.time_secs = t_secs;
        self.pulse_rings = (0..PULSE_RING_COUNT)
            .map(|i| Pulse {
                scale: KeyframeTrack::pulse_ring_scale(i).sample(t_secs),
                opacity: KeyframeTrack::pulse_ring_opacity(i).sample(t_secs),
            })
            .collect();
        self.glow = (
            KeyframeTrack::glow_radius().sample(t_secs),
            KeyframeTrack::glow_alpha().sample(t_secs),
        );
        self.holo_glow = Pulse {
            scale: KeyframeTrack::holographic_glow_scale().sample(t_secs),
            opacity: KeyframeTrack::holographic_glow_opacity().sample(t_secs),
        };
        self.stat_icon = (
            KeyframeTrack::stat_icon_spin().sample(t_secs),
            KeyframeTrack::stat_icon_scale().sample(t_secs),
        );
        self.bolt = (
            KeyframeTrack::bolt_rotation().sample(t_secs),
            KeyframeTrack::bolt_scale().sample(t_secs),
        );
        self.wave = KeyframeTrack::wave_morph().sample(t_secs);
        self.feature_icons = (0..content.features.features.len())
            .map(|i| {
                (
                    KeyframeTrack::feature_float(i).sample(t_secs),
                    KeyframeTrack::feature_tilt(i).sample(t_secs),
                )
            })
            .collect();
        self.roadmap_pulses = (0..content.roadmap.milestones.len())
            .map(|i| {
                (
                    KeyframeTrack::roadmap_pulse_spread(i).sample(t_secs),
                    KeyframeTrack::roadmap_pulse_alpha(i).sample(t_secs),
                )
            })
            .collect();
    }
}

impl CounterFrame {
    pub fn new(stat: &HeroStat, value: u64, target: u64, glitching: bool) -> Self {
        Self {
            label: stat.label.clone(),
            icon: stat.icon.clone(),
            value,
            target,
            text: format!("{}{}", format_thousands(value), stat.suffix),
            glitching,
        }
    }
}

/// Render the full document, doctype included.
pub fn render_html(content: &PageContent, frame: &PageFrame) -> String {
    let mut html = String::from("<!DOCTYPE html>\n");
    render_document(content, frame).render_into(&mut html);
    html.push('\n');
    html
}

/// The `<html>` element for `content` at `frame`.
pub fn render_document(content: &PageContent, frame: &PageFrame) -> Node {
    Element::new("html")
        .attr("lang", content.metadata.lang.as_str())
        .child(head(content))
        .child(
            Element::new("body")
                .class("pizzafun")
                .children(follower(frame))
                .child(header(content, frame))
                .child(
                    Element::new("main")
                        .child(hero(content, frame))
                        .child(features(content, frame))
                        .child(performance(content, frame))
                        .child(tokenomics(content, frame))
                        .child(roadmap(content, frame))
                        .child(call_to_action(content)),
                )
                .child(footer(content)),
        )
        .into()
}

fn meta(name_attr: &str, name: &str, value: &str) -> Element {
    Element::new("meta")
        .attr(name_attr, name)
        .attr("content", value)
}

fn head(content: &PageContent) -> Element {
    let m = &content.metadata;
    Element::new("head")
        .child(Element::new("meta").attr("charset", "utf-8"))
        .child(meta("name", "viewport", "width=device-width, initial-scale=1"))
        .child(Element::new("title").text(m.title.as_str()))
        .child(meta("name", "description", &m.description))
        .child(meta("property", "og:title", &m.title))
        .child(meta("property", "og:description", &m.description))
        .child(meta("property", "og:type", "website"))
        .child(meta("name", "twitter:card", "summary_large_image"))
        .child(meta("name", "twitter:title", &m.title))
        .child(meta("name", "twitter:description", &m.description))
        .child(
            Element::new("link")
                .attr("rel", "icon")
                .attr("href", m.favicon.as_str())
                .attr("type", "image/svg+xml"),
        )
}

fn follower(frame: &PageFrame) -> Option<Element> {
    frame.follower.as_ref().map(|transform| {
        Element::new("div")
            .class("pointer-follower")
            .style(format!("transform: {transform}"))
    })
}

/// A card that tilts toward the pointer, with its pulsing inner glow as
/// the first child.
fn holographic(tag: &str, class: &str, transform: &str, frame: &PageFrame) -> Element {
    let glow = frame.holo_glow;
    Element::new(tag)
        .class(format!("{class} holographic"))
        .style(format!("transform: {transform}"))
        .child(Element::new("div").class("holographic-glow").style(format!(
            "transform: scale({:.4}); opacity: {:.3}",
            glow.scale, glow.opacity
        )))
}

fn nav_links(content: &PageContent) -> impl Iterator<Item = Element> + '_ {
    content.header.nav.iter().map(|label| {
        Element::new("a")
            .attr("href", format!("#{}", anchor_id(label)))
            .text(label.as_str())
    })
}

fn header(content: &PageContent, frame: &PageFrame) -> Element {
    let h = &content.header;
    let (glow_radius, glow_alpha) = frame.glow;
    let (toggle_label, toggle_icon) = if frame.menu_open {
        ("Close menu", "x")
    } else {
        ("Open menu", "menu")
    };
    let mobile_menu = frame.menu_open.then(|| {
        Element::new("nav")
            .class("mobile-menu")
            .id("mobile-menu")
            .children(nav_links(content))
    });

    Element::new("header")
        .class("site-header")
        .child(
            Element::new("div")
                .class("brand")
                .child(Element::new("span").class("logo").text(h.logo.as_str()))
                .child(Element::new("span").class("brand-name").text(h.brand.as_str()))
                .child(Element::new("span").class("version").text(h.version_tag.as_str())),
        )
        .child(Element::new("nav").class("desktop-nav").children(nav_links(content)))
        .child(
            Element::new("div")
                .class("header-actions")
                .child(Element::new("button").class("secondary").text(h.secondary_button.as_str()))
                .child(
                    Element::new("button")
                        .class("primary")
                        .style(format!(
                            "box-shadow: 0 0 {glow_radius:.1}px rgba(255, 147, 37, {glow_alpha:.3})"
                        ))
                        .text(h.primary_button.as_str()),
                ),
        )
        .child(
            Element::new("button")
                .class("menu-toggle")
                .attr("aria-controls", "mobile-menu")
                .attr("aria-expanded", frame.menu_open.to_string())
                .attr("aria-label", toggle_label)
                .attr("data-icon", toggle_icon),
        )
        .children(mobile_menu)
}

fn kicker(text: &str) -> Element {
    Element::new("p").class("kicker").text(text)
}

fn hero(content: &PageContent, frame: &PageFrame) -> Element {
    let hero = &content.hero;

    let particles = frame.particles.iter().map(|p| {
        Element::new("span").class("particle").style(format!(
            "left: {:.1}px; top: {:.1}px; width: {:.2}px; height: {:.2}px; background: {}; transform: scale({:.3})",
            p.left, p.top, p.width, p.height, p.color, p.scale
        ))
    });

    let headline = frame.headline.iter().map(|glyphs| {
        Element::new("span").class("headline-line").children(glyphs.iter().map(|g| {
            Element::new("span")
                .class("glyph")
                .style(format!(
                    "display: inline-block; opacity: {:.3}; transform: {}",
                    g.opacity,
                    g.css_transform()
                ))
                .text(g.ch.to_string())
        }))
    });
    let (bolt_rotation, bolt_scale) = frame.bolt;
    let bolt = Element::new("span")
        .class("bolt")
        .style(format!(
            "display: inline-block; transform: rotate({bolt_rotation:.3}deg) scale({bolt_scale:.4})"
        ))
        .text("\u{26a1}");

    let lead = hero.lead.iter().map(|run| {
        let span = Element::new("span").text(run.text.as_str());
        if run.highlight {
            span.class("highlight")
        } else {
            span
        }
    });

    let (icon_spin, icon_scale) = frame.stat_icon;
    let stats = frame.counters.iter().enumerate().map(|(i, counter)| {
        let rings = frame.pulse_rings.iter().map(|ring| {
            Element::new("span").class("pulse-ring").style(format!(
                "transform: scale({:.3}); opacity: {:.3}",
                ring.scale, ring.opacity
            ))
        });
        let value = Element::new("div").class("stat-value").text(counter.text.as_str());
        let value = if counter.glitching {
            value.attr("data-glitch", "true")
        } else {
            value
        };
        let transform = frame.stat_transforms.get(i).map_or(NEUTRAL_TILT, String::as_str);
        holographic("div", "stat-card", transform, frame)
            .child(
                Element::new("div")
                    .class("pulse-rings")
                    .style(format!(
                        "width: {PULSE_RING_SIZE_PX}px; height: {PULSE_RING_SIZE_PX}px"
                    ))
                    .children(rings),
            )
            .child(
                Element::new("span")
                    .class("icon")
                    .attr("data-icon", counter.icon.as_str())
                    .style(format!(
                        "transform: rotateY({icon_spin:.3}deg) scale({icon_scale:.4})"
                    )),
            )
            .child(value)
            .child(Element::new("div").class("stat-label").text(counter.label.as_str()))
    });

    let cta_style = |index: usize| {
        let transform = frame.cta_transforms.get(index).map_or(NEUTRAL_MAGNETIC, String::as_str);
        format!("transform: {transform}")
    };

    Element::new("section")
        .id("hero")
        .child(
            Element::new("div")
                .class("grid-background")
                .style(format!("transform: {}", frame.background)),
        )
        .child(Element::new("div").class("particles").children(particles))
        .child(kicker(&frame.kicker).class("kicker typewriter"))
        .child(Element::new("h1").children(headline).child(bolt))
        .child(Element::new("p").class("lead").children(lead))
        .child(Element::new("div").class("stats").children(stats))
        .child(
            Element::new("div")
                .class("hero-actions")
                .child(
                    Element::new("button")
                        .class("magnetic primary")
                        .style(cta_style(0))
                        .text(hero.primary_cta.as_str()),
                )
                .child(
                    Element::new("button")
                        .class("magnetic secondary")
                        .style(cta_style(1))
                        .text(hero.secondary_cta.as_str()),
                ),
        )
}

fn features(content: &PageContent, frame: &PageFrame) -> Element {
    let section = &content.features;
    let cards = section.features.iter().enumerate().map(|(i, feature)| {
        let transform = frame.card_transforms.get(i).map_or(NEUTRAL_TILT, String::as_str);
        let (float_y, tilt) = frame.feature_icons.get(i).copied().unwrap_or_default();
        let badges = feature
            .badges
            .iter()
            .map(|b| Element::new("span").class("badge").text(b.as_str()));
        holographic("article", "feature-card", transform, frame)
            .child(
                Element::new("div")
                    .class("icon")
                    .attr("data-icon", feature.icon.as_str())
                    .style(format!(
                        "transform: translateY({float_y:.3}px) rotateX({tilt:.3}deg)"
                    )),
            )
            .child(Element::new("h3").text(feature.title.as_str()))
            .child(Element::new("p").text(feature.description.as_str()))
            .child(Element::new("div").class("badges").children(badges))
    });

    Element::new("section")
        .id("features")
        .child(kicker(&section.kicker))
        .child(Element::new("h2").text(section.heading.as_str()))
        .child(Element::new("div").class("feature-grid").children(cards))
}

fn performance(content: &PageContent, frame: &PageFrame) -> Element {
    let section = &content.performance;
    let metrics = section.metrics.iter().map(|m| {
        Element::new("div")
            .class("metric")
            .child(Element::new("span").class("metric-name").text(m.metric.as_str()))
            .child(Element::new("span").class("metric-value").text(m.value.as_str()))
            .child(Element::new("p").text(m.description.as_str()))
    });

    Element::new("section")
        .id("technology")
        .child(Element::new("h2").text(section.heading.as_str()))
        .child(
            holographic("div", "chart-card", &frame.chart_transform, frame)
                .child(Element::new("h3").text(section.chart_title.as_str()))
                .child(area_chart(&section.points, 600.0, 300.0))
                .child(
                    Element::new("div")
                        .class("legend")
                        .child(Element::new("span").class("legend-baseline").text(section.baseline_label.as_str()))
                        .child(Element::new("span").class("legend-product").text(section.product_label.as_str())),
                ),
        )
        .child(
            Element::new("div")
                .class("metrics")
                .child(Element::new("h3").text(section.metrics_title.as_str()))
                .children(metrics),
        )
        .child(wave(frame.wave))
}

fn tokenomics(content: &PageContent, frame: &PageFrame) -> Element {
    let section = &content.tokenomics;
    let legend = section
        .allocations
        .iter()
        .take(section.legend_size)
        .map(|a| {
            Element::new("li")
                .child(
                    Element::new("span")
                        .class("swatch")
                        .style(format!("background: {}", a.color)),
                )
                .child(Element::new("span").text(a.name.as_str()))
                .child(Element::new("span").class("share").text(format!("{}%", a.value)))
        });
    let utilities = section
        .utilities
        .iter()
        .map(|u| Element::new("li").text(u.as_str()));

    Element::new("section")
        .id("tokenomics")
        .child(kicker(&section.kicker))
        .child(Element::new("h2").text(section.heading.as_str()))
        .child(
            holographic("div", "tokenomics-card", &frame.tokenomics_transform, frame)
                .child(pie_chart(&section.allocations, 320.0))
                .child(
                    Element::new("div")
                        .class("supply")
                        .child(Element::new("div").class("supply-value").text(format_thousands(section.total_supply)))
                        .child(Element::new("div").class("supply-label").text(section.supply_label.as_str()))
                        .child(Element::new("div").class("supply-note").text(section.supply_note.as_str())),
                ),
        )
        .child(Element::new("ul").class("allocation-legend").children(legend))
        .child(
            Element::new("div")
                .class("utilities")
                .child(Element::new("h3").text(section.utilities_title.as_str()))
                .child(Element::new("ul").children(utilities)),
        )
}

fn roadmap(content: &PageContent, frame: &PageFrame) -> Element {
    let section = &content.roadmap;
    let milestones = section.milestones.iter().enumerate().map(|(i, m)| {
        let (spread, alpha) = frame.roadmap_pulses.get(i).copied().unwrap_or_default();
        let dot = Element::new("span").class("dot");
        let dot = if m.status == MilestoneStatus::Active {
            dot.style(format!(
                "box-shadow: 0 0 0 {spread:.2}px rgba(255, 147, 37, {alpha:.3})"
            ))
        } else {
            dot
        };
        let items = m.items.iter().map(|item| Element::new("li").text(item.as_str()));
        let transform = frame.roadmap_transforms.get(i).map_or(NEUTRAL_TILT, String::as_str);
        Element::new("li")
            .class(format!("milestone status-{}", m.status.label().to_lowercase()))
            .child(dot)
            .child(
                holographic("div", "milestone-card", transform, frame)
                    .child(Element::new("span").class("period").text(m.period.as_str()))
                    .child(Element::new("span").class("status").text(m.status.label()))
                    .child(Element::new("h3").text(m.title.as_str()))
                    .child(Element::new("ul").children(items)),
            )
    });

    Element::new("section")
        .id("roadmap")
        .child(kicker(&section.kicker))
        .child(Element::new("h2").text(section.heading.as_str()))
        .child(Element::new("ol").class("timeline").children(milestones))
}

fn call_to_action(content: &PageContent) -> Element {
    let cta = &content.cta;
    Element::new("section")
        .id("join")
        .child(kicker(&cta.kicker))
        .child(Element::new("h2").text(cta.heading.as_str()))
        .child(
            Element::new("p")
                .text(format!("{} ", cta.body))
                .child(Element::new("strong").text(cta.emphasis.as_str())),
        )
        .child(Element::new("button").class("primary").text(cta.primary_button.as_str()))
        .child(Element::new("button").class("secondary").text(cta.secondary_button.as_str()))
}

fn footer(content: &PageContent) -> Element {
    let f = &content.footer;
    let tagline = f.tagline.iter().map(|line| Element::new("p").text(line.as_str()));
    let socials = f.socials.iter().map(|s| {
        Element::new("a")
            .attr("href", s.href.as_str())
            .attr("aria-label", s.name.as_str())
            .text(s.name.as_str())
    });
    let sections = f.sections.iter().map(|s| {
        Element::new("div")
            .class("footer-section")
            .child(Element::new("h4").text(s.title.as_str()))
            .child(
                Element::new("ul")
                    .children(s.links.iter().map(|l| Element::new("li").text(l.as_str()))),
            )
    });
    let legal = f
        .legal
        .iter()
        .map(|l| Element::new("a").attr("href", "#").text(l.as_str()));

    Element::new("footer")
        .id("community")
        .child(Element::new("div").class("tagline").children(tagline))
        .child(Element::new("div").class("socials").children(socials))
        .child(Element::new("div").class("footer-sections").children(sections))
        .child(
            Element::new("div")
                .class("legal")
                .child(Element::new("span").text(f.copyright.as_str()))
                .children(legal),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settled_document() -> (PageContent, Node) {
        let content = PageContent::pizzafun();
        let frame = PageFrame::settled(&content);
        let doc = render_document(&content, &frame);
        (content, doc)
    }

    #[test]
    fn test_every_nav_link_has_a_target() {
        let (content, doc) = settled_document();
        for label in &content.header.nav {
            let id = anchor_id(label);
            assert!(doc.find_by_id(&id).is_some(), "missing section #{id}");
        }
    }

    #[test]
    fn test_head_metadata() {
        let (_, doc) = settled_document();
        let html = doc.render();
        assert!(html.contains("<title>PizzaFun</title>"));
        assert!(html.contains("name=\"twitter:card\" content=\"summary_large_image\""));
        assert!(html.contains("property=\"og:title\" content=\"PizzaFun\""));
        assert!(html.contains("href=\"/favicon.svg\""));
    }

    #[test]
    fn test_settled_frame_shows_final_values() {
        let (content, doc) = settled_document();
        let frame = PageFrame::settled(&content);
        let texts: Vec<&str> = frame.counters.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["2SEC", "35,000TPS", "0$"]);
        assert_eq!(frame.kicker, "NEXT-GEN TRADING PROTOCOL");

        let hero = doc.render();
        assert!(hero.contains("35,000TPS"));
        assert!(hero.contains("210,000,000"));
        assert!(hero.contains("&nbsp;") || hero.contains('\u{a0}'));
    }

    #[test]
    fn test_one_slice_per_allocation() {
        let (content, doc) = settled_document();
        let tokenomics = doc.find_by_id("tokenomics").unwrap();
        let node: Node = tokenomics.clone().into();
        let html = node.render();
        assert_eq!(
            html.matches("class=\"slice\"").count(),
            content.tokenomics.allocations.len()
        );
        assert_eq!(node.count_tag("li"), content.tokenomics.legend_size + content.tokenomics.utilities.len());
    }

    #[test]
    fn test_follower_only_when_present() {
        let content = PageContent::pizzafun();
        let mut frame = PageFrame::settled(&content);
        assert!(!render_html(&content, &frame).contains("pointer-follower"));
        frame.follower = Some("translate3d(1px, 2px, 0px)".into());
        assert!(render_html(&content, &frame).contains("class=\"pointer-follower\""));
    }

    #[test]
    fn test_glitch_marks_counter() {
        let content = PageContent::pizzafun();
        let mut frame = PageFrame::settled(&content);
        frame.counters[1].glitching = true;
        let html = render_html(&content, &frame);
        assert_eq!(html.matches("data-glitch=\"true\"").count(), 1);
    }

    #[test]
    fn test_ambient_decorations_sized_to_content() {
        let content = PageContent::pizzafun();
        let mut frame = PageFrame::settled(&content);
        frame.apply_ambient(&content, 1.0);
        assert_eq!(frame.pulse_rings.len(), PULSE_RING_COUNT);
        assert_eq!(frame.pulse_rings[0].scale, 2.0);
        assert_eq!(frame.feature_icons.len(), content.features.features.len());
        assert_eq!(frame.roadmap_pulses.len(), content.roadmap.milestones.len());
    }

    #[test]
    fn test_every_holographic_surface_is_rendered() {
        let (content, doc) = settled_document();
        let cards = doc.find_by_class("holographic");
        let expected = content.hero.stats.len()
            + content.features.features.len()
            + 1
            + 1
            + content.roadmap.milestones.len();
        assert_eq!(cards.len(), expected);
        for card in &cards {
            assert_eq!(card.get_attr("style"), Some(format!("transform: {NEUTRAL_TILT}").as_str()));
        }
        assert_eq!(doc.find_by_class("holographic-glow").len(), expected);

        let chart = doc.find_by_class("chart-card");
        assert!(chart[0].has_class("holographic"));
        assert!(doc.find_by_class("tokenomics-card")[0].has_class("holographic"));
        assert_eq!(doc.find_by_class("milestone-card").len(), content.roadmap.milestones.len());
    }

    #[test]
    fn test_surface_transforms_reach_their_cards() {
        let content = PageContent::pizzafun();
        let mut frame = PageFrame::settled(&content);
        frame.stat_transforms[1] = "perspective(1000px) rotateX(3.000deg)".into();
        frame.chart_transform = "perspective(1000px) rotateY(-4.000deg)".into();
        frame.roadmap_transforms[0] = "perspective(1000px) scale(1.0500)".into();
        let doc = render_document(&content, &frame);

        let stats = doc.find_by_class("stat-card");
        assert_eq!(stats[1].get_attr("style"), Some("transform: perspective(1000px) rotateX(3.000deg)"));
        assert!(doc.find_by_class("chart-card")[0]
            .get_attr("style")
            .is_some_and(|s| s.contains("rotateY(-4.000deg)")));
        assert!(doc.find_by_class("milestone-card")[0]
            .get_attr("style")
            .is_some_and(|s| s.contains("scale(1.0500)")));
    }

    #[test]
    fn test_pulse_rings_sit_on_stat_cards() {
        let (content, doc) = settled_document();
        let stats = doc.find_by_class("stat-card");
        assert_eq!(stats.len(), content.hero.stats.len());
        for card in stats {
            let node: Node = card.clone().into();
            assert_eq!(node.find_by_class("pulse-ring").len(), PULSE_RING_COUNT);
            assert_eq!(
                node.find_by_class("pulse-rings")[0].get_attr("style"),
                Some("width: 60px; height: 60px")
            );
        }
        let actions: Node = doc.find_by_class("hero-actions")[0].clone().into();
        assert!(actions.find_by_class("pulse-ring").is_empty());
        assert!(!actions.render().contains("box-shadow"));
    }

    #[test]
    fn test_header_call_to_action_glows() {
        let content = PageContent::pizzafun();
        let mut frame = PageFrame::settled(&content);
        frame.apply_ambient(&content, 1.0);
        assert_eq!(frame.glow, (40.0, 0.6));
        let doc = render_document(&content, &frame);
        let header: Node = doc.find_by_class("header-actions")[0].clone().into();
        assert!(header
            .render()
            .contains("box-shadow: 0 0 40.0px rgba(255, 147, 37, 0.600)"));
    }

    #[test]
    fn test_looping_decorations_follow_time() {
        let content = PageContent::pizzafun();
        let mut frame = PageFrame::settled(&content);
        frame.apply_ambient(&content, 1.5);
        assert_eq!(frame.holo_glow.scale, 1.1);
        assert_eq!(frame.holo_glow.opacity, 0.8);
        frame.apply_ambient(&content, 1.0);
        assert_eq!(frame.bolt.1, 1.2);
        assert_eq!(frame.stat_icon.0, 90.0);
        frame.apply_ambient(&content, 4.0);
        assert_eq!(frame.wave, 1.0);

        let html = render_html(&content, &frame);
        assert!(html.contains("class=\"bolt\""));
        assert!(html.contains("\u{26a1}"));
        assert!(html.contains(&crate::charts::wave_path(1.0)));
        assert!(html.contains("transform: rotateY(0.000deg) scale(1.0000)"));
    }

    #[test]
    fn test_menu_toggle_reflects_state() {
        let content = PageContent::pizzafun();
        let mut frame = PageFrame::settled(&content);
        let doc = render_document(&content, &frame);
        let toggle = doc.find_by_class("menu-toggle")[0];
        assert_eq!(toggle.get_attr("aria-expanded"), Some("false"));
        assert_eq!(toggle.get_attr("data-icon"), Some("menu"));
        assert!(doc.find_by_id("mobile-menu").is_none());

        frame.menu_open = true;
        let doc = render_document(&content, &frame);
        let toggle = doc.find_by_class("menu-toggle")[0];
        assert_eq!(toggle.get_attr("aria-expanded"), Some("true"));
        assert_eq!(toggle.get_attr("data-icon"), Some("x"));
        let menu: Node = doc.find_by_id("mobile-menu").unwrap().clone().into();
        assert_eq!(menu.count_tag("a"), content.header.nav.len());
    }

    #[test]
    fn test_document_starts_with_doctype() {
        let content = PageContent::pizzafun();
        let html = render_html(&content, &PageFrame::settled(&content));
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
    }
}
