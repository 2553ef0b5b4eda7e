use crate::constants::{OVERLAY_ID, OVERLAY_PATH_ID, SVG_NS};
use crate::core::{Curve, CurvePlanner, Heading, MotionPath};
use crate::dom::{self, js_err};
use web_sys as web;

/// Full-viewport SVG layer holding at most one motion curve.
pub struct MotionPathOverlay {
    document: web::Document,
    svg: web::Element,
    planner: CurvePlanner,
}

impl MotionPathOverlay {
    /// Create `<svg id="generated">` sized to the window and attach it to the body.
    ///
    /// The size is read once here; later window resizes are not tracked.
    pub fn mount(window: &web::Window) -> anyhow::Result<Self> {
        let document = window
            .document()
            .ok_or_else(|| anyhow::anyhow!("no document"))?;
        let body = document.body().ok_or_else(|| anyhow::anyhow!("no body"))?;
        let viewport = dom::viewport(window)?;

        let svg = document
            .create_element_ns(Some(SVG_NS), "svg")
            .map_err(js_err)?;
        svg.set_attribute("id", OVERLAY_ID).map_err(js_err)?;
        svg.set_attribute("height", &viewport.height.to_string())
            .map_err(js_err)?;
        svg.set_attribute("width", &viewport.width.to_string())
            .map_err(js_err)?;
        body.append_child(&svg).map_err(js_err)?;

        log::info!(
            "[motion] overlay mounted {}x{}",
            viewport.width,
            viewport.height
        );
        Ok(Self {
            document,
            svg,
            planner: CurvePlanner::new(viewport),
        })
    }

    /// Draw `path`, continuing from the end of the curve already on screen.
    pub fn draw(&mut self, path: MotionPath) -> anyhow::Result<&Heading> {
        let previous = self.svg.query_selector("path").map_err(js_err)?;
        // an existing path without data is malformed, not absent
        let previous_d = previous.map(|el| el.get_attribute("d").unwrap_or_default());
        let curve = self.planner.plan(path, previous_d.as_deref())?;
        // nothing is recorded unless the new curve actually made it on screen
        self.render(&curve)?;
        let heading = self.planner.commit(&curve);

        log::debug!(
            "[motion] {} -> {} {}/{} distance={}",
            curve.path.start,
            curve.path.end,
            heading.vertical.as_str(),
            heading.horizontal.as_str(),
            heading.distance
        );
        Ok(heading)
    }

    fn render(&self, curve: &Curve) -> anyhow::Result<()> {
        if let Some(old) = self.svg.query_selector("path").map_err(js_err)? {
            _ = self.svg.remove_child(&old);
        }
        let path = self
            .document
            .create_element_ns(Some(SVG_NS), "path")
            .map_err(js_err)?;
        path.set_attribute_ns(None, "d", &curve.path_data())
            .map_err(js_err)?;
        path.set_attribute_ns(None, "id", OVERLAY_PATH_ID)
            .map_err(js_err)?;
        self.svg.append_child(&path).map_err(js_err)?;
        Ok(())
    }

    pub fn heading(&self) -> Option<&Heading> {
        self.planner.heading()
    }

    /// Record how long the latest motion took, in milliseconds.
    pub fn set_duration(&mut self, duration_ms: f64) {
        match self.planner.heading_mut() {
            Some(h) => h.set_duration(duration_ms),
            None => log::warn!("[motion] duration set before any curve was drawn"),
        }
    }
}
