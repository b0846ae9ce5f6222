use super::renderer::{LabelHandle, LabelOptions, MolecularRenderer, ModelFormat};
use super::scheme::{ColorScheme, VisualizationStyle};
use super::style::{build_style_spec, Selector};
use crate::error::MolscopeError;
use crate::input::KeyAction;
use crate::measurement::{AddAtomOutcome, AtomSelection, MeasurementSession};
use crate::options::DisplayOptions;

/// Result of a click on the viewport.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Measuring is off; the click was not forwarded.
    Ignored,
    /// No clickable atom under the cursor.
    Missed,
    /// First atom of a pair selected.
    Pending(AtomSelection),
    /// Pair completed; carries the new measurement's id.
    Measured(String),
}

/// Drives a [`MolecularRenderer`]: current style and coloring, the
/// measurement session and the distance labels that mirror it.
pub struct Viewer<R: MolecularRenderer> {
    renderer: R,
    style: VisualizationStyle,
    color_scheme: ColorScheme,
    background_color: String,
    initial_zoom: f32,
    zoom_duration_ms: u32,
    session: MeasurementSession,
    /// (measurement id, label) pairs, in measurement order.
    labels: Vec<(String, LabelHandle)>,
    loaded: bool,
}

impl<R: MolecularRenderer> Viewer<R> {
    /// Wrap `renderer` with the initial look from `options`.
    #[must_use]
    pub fn new(renderer: R, options: &DisplayOptions) -> Self {
        Self {
            renderer,
            style: options.style,
            color_scheme: options.color_scheme,
            background_color: options.background_color.clone(),
            initial_zoom: options.initial_zoom,
            zoom_duration_ms: options.zoom_duration_ms,
            session: MeasurementSession::new(),
            labels: Vec::new(),
            loaded: false,
        }
    }

    /// Current visualization style.
    #[must_use]
    pub fn style(&self) -> VisualizationStyle {
        self.style
    }

    /// Current color scheme.
    #[must_use]
    pub fn color_scheme(&self) -> ColorScheme {
        self.color_scheme
    }

    /// The measurement session.
    #[must_use]
    pub fn session(&self) -> &MeasurementSession {
        &self.session
    }

    /// Whether a model has been loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Borrow the renderer.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Consume the viewer, returning the renderer.
    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Show a new structure: load, style, fit, render, then the entry zoom.
    ///
    /// Measurements refer to atoms of the previous model, so they and
    /// their labels are dropped.
    pub fn load(&mut self, structure: &str) -> Result<(), MolscopeError> {
        self.renderer.load_model(structure, ModelFormat::Pdb)?;
        self.renderer.set_background_color(&self.background_color);
        self.loaded = true;
        self.session.clear_measurements();
        self.sync_labels();
        self.apply_style();
        self.renderer.zoom_to();
        self.renderer.render();
        self.renderer.zoom(self.initial_zoom, self.zoom_duration_ms);
        if self.session.is_active() {
            self.renderer.set_clickable(&Selector::All, true);
        }
        Ok(())
    }

    /// Switch representation.
    pub fn set_style(&mut self, style: VisualizationStyle) {
        self.style = style;
        self.apply_style();
    }

    /// Switch coloring.
    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        self.color_scheme = scheme;
        self.apply_style();
    }

    /// Change the viewport background. Applied now if a model is shown,
    /// otherwise on the next load.
    pub fn set_background_color(&mut self, color: &str) {
        color.clone_into(&mut self.background_color);
        if self.loaded {
            self.renderer.set_background_color(color);
            self.renderer.render();
        }
    }

    /// Current viewport background.
    #[must_use]
    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    /// Advance to the next style; returns it.
    pub fn cycle_style(&mut self) -> VisualizationStyle {
        self.set_style(self.style.next());
        self.style
    }

    /// Advance to the next color scheme; returns it.
    pub fn cycle_color_scheme(&mut self) -> ColorScheme {
        self.set_color_scheme(self.color_scheme.next());
        self.color_scheme
    }

    /// Fit the camera to the model again.
    pub fn reset_view(&mut self) {
        if !self.loaded {
            return;
        }
        self.renderer.zoom_to();
        self.renderer.render();
    }

    /// Toggle measuring and atom clickability together.
    pub fn toggle_measuring(&mut self) -> bool {
        self.session.toggle_active();
        let active = self.session.is_active();
        if self.loaded {
            self.renderer.set_clickable(&Selector::All, active);
        }
        active
    }

    /// Route a click at screen position (`x`, `y`) into the session.
    pub fn handle_click(&mut self, x: f32, y: f32) -> ClickOutcome {
        if !self.session.is_active() {
            return ClickOutcome::Ignored;
        }
        let Some(atom) = self.renderer.pick_atom(x, y) else {
            return ClickOutcome::Missed;
        };
        let outcome = match self.session.add_atom(atom.clone()) {
            AddAtomOutcome::Ignored => ClickOutcome::Ignored,
            AddAtomOutcome::Pending => ClickOutcome::Pending(atom),
            AddAtomOutcome::Completed(m) => {
                ClickOutcome::Measured(m.id().to_owned())
            }
        };
        if matches!(outcome, ClickOutcome::Measured(_)) {
            self.sync_labels();
        }
        outcome
    }

    /// Delete one measurement and its label.
    pub fn remove_measurement(&mut self, id: &str) -> bool {
        let removed = self.session.remove_measurement(id);
        if removed {
            self.sync_labels();
        }
        removed
    }

    /// Delete every measurement and label.
    pub fn clear_measurements(&mut self) {
        self.session.clear_measurements();
        self.sync_labels();
    }

    /// Make renderer labels match the session: one label per measurement
    /// at its midpoint, none for removed ones.
    pub fn sync_labels(&mut self) {
        let measurements = self.session.measurements();
        let renderer = &mut self.renderer;
        let before = self.labels.len();
        self.labels.retain(|(id, handle)| {
            let keep = measurements.iter().any(|m| m.id() == id);
            if !keep {
                renderer.remove_label(*handle);
            }
            keep
        });
        let mut changed = self.labels.len() != before;
        for m in measurements {
            if self.labels.iter().any(|(id, _)| id == m.id()) {
                continue;
            }
            let handle = self.renderer.add_label(
                &m.label_text(),
                &LabelOptions::measurement(m.midpoint()),
            );
            self.labels.push((m.id().to_owned(), handle));
            changed = true;
        }
        if changed {
            self.renderer.render();
        }
    }

    /// Number of labels currently shown.
    #[must_use]
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// PNG bytes of the current frame.
    pub fn snapshot(&mut self) -> Result<Vec<u8>, MolscopeError> {
        self.renderer.png_snapshot()
    }

    /// Run a viewer-level key action. Returns whether it was handled here;
    /// the rest (search focus, dialogs, theme, export) belong to the host.
    pub fn handle_action(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::ResetCamera => self.reset_view(),
            KeyAction::CycleStyle => {
                let _ = self.cycle_style();
            }
            KeyAction::CycleColorScheme => {
                let _ = self.cycle_color_scheme();
            }
            KeyAction::ToggleMeasure => {
                let _ = self.toggle_measuring();
            }
            KeyAction::FocusSearch
            | KeyAction::Back
            | KeyAction::ExportImage
            | KeyAction::ShowShortcuts
            | KeyAction::ToggleTheme => return false,
        }
        true
    }

    fn apply_style(&mut self) {
        if !self.loaded {
            return;
        }
        let spec = build_style_spec(self.color_scheme, self.style);
        self.renderer.remove_all_surfaces();
        self.renderer.set_style(&Selector::All, None);
        self.renderer
            .set_style(&Selector::All, Some(&spec.representation));
        if let Some(surface) = &spec.surface {
            self.renderer.add_surface(surface);
        }
        self.renderer.render();
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use std::collections::VecDeque;

    use super::*;
    use crate::visualization::{RepresentationSpec, SurfaceSpec};

    /// One renderer call, as observed by [`RecordingRenderer`].
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Call {
        LoadModel,
        SetStyle(Option<RepresentationSpec>),
        AddSurface(SurfaceSpec),
        RemoveAllSurfaces,
        SetBackground(String),
        Render,
        ZoomTo,
        Zoom(f32, u32),
        SetClickable(bool),
        AddLabel(String, LabelHandle),
        RemoveLabel(LabelHandle),
    }

    /// Records calls; picks come from a queue.
    #[derive(Default)]
    pub(crate) struct RecordingRenderer {
        pub calls: Vec<Call>,
        pub picks: VecDeque<Option<AtomSelection>>,
        pub png: Vec<u8>,
        pub next_label: u64,
    }

    impl RecordingRenderer {
        pub fn take_calls(&mut self) -> Vec<Call> {
            std::mem::take(&mut self.calls)
        }
    }

    impl MolecularRenderer for RecordingRenderer {
        fn load_model(
            &mut self,
            _text: &str,
            _format: ModelFormat,
        ) -> Result<(), MolscopeError> {
            self.calls.push(Call::LoadModel);
            Ok(())
        }

        fn set_style(
            &mut self,
            _selector: &Selector,
            spec: Option<&RepresentationSpec>,
        ) {
            self.calls.push(Call::SetStyle(spec.cloned()));
        }

        fn add_surface(&mut self, surface: &SurfaceSpec) {
            self.calls.push(Call::AddSurface(surface.clone()));
        }

        fn remove_all_surfaces(&mut self) {
            self.calls.push(Call::RemoveAllSurfaces);
        }

        fn set_background_color(&mut self, color: &str) {
            self.calls.push(Call::SetBackground(color.to_owned()));
        }

        fn render(&mut self) {
            self.calls.push(Call::Render);
        }

        fn zoom_to(&mut self) {
            self.calls.push(Call::ZoomTo);
        }

        fn zoom(&mut self, factor: f32, duration_ms: u32) {
            self.calls.push(Call::Zoom(factor, duration_ms));
        }

        fn set_clickable(&mut self, _selector: &Selector, enabled: bool) {
            self.calls.push(Call::SetClickable(enabled));
        }

        fn pick_atom(&mut self, _x: f32, _y: f32) -> Option<AtomSelection> {
            self.picks.pop_front().flatten()
        }

        fn add_label(&mut self, text: &str, _options: &LabelOptions) -> LabelHandle {
            self.next_label += 1;
            let handle = LabelHandle(self.next_label);
            self.calls.push(Call::AddLabel(text.to_owned(), handle));
            handle
        }

        fn remove_label(&mut self, handle: LabelHandle) {
            self.calls.push(Call::RemoveLabel(handle));
        }

        fn png_snapshot(&mut self) -> Result<Vec<u8>, MolscopeError> {
            Ok(self.png.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::recording::{Call, RecordingRenderer};
    use super::*;
    use crate::measurement::fixtures::{origin, three_four_zero, unit_diagonal};
    use crate::visualization::SurfaceKind;

    fn loaded_viewer() -> Viewer<RecordingRenderer> {
        let mut viewer =
            Viewer::new(RecordingRenderer::default(), &DisplayOptions::default());
        viewer.load("ATOM      1  N   ALA A   1").unwrap();
        let _ = viewer.renderer.take_calls();
        viewer
    }

    #[test]
    fn load_sequence() {
        let mut viewer =
            Viewer::new(RecordingRenderer::default(), &DisplayOptions::default());
        viewer.load("HEADER").unwrap();
        let calls = viewer.renderer.take_calls();
        assert_eq!(calls[0], Call::LoadModel);
        assert_eq!(calls[1], Call::SetBackground("rgb(10, 10, 26)".into()));
        assert!(calls.contains(&Call::ZoomTo));
        assert_eq!(calls.last(), Some(&Call::Zoom(1.2, 800)));
        let zoom_to = calls.iter().position(|c| *c == Call::ZoomTo).unwrap();
        assert_eq!(calls[zoom_to + 1], Call::Render);
        assert!(viewer.is_loaded());
    }

    #[test]
    fn background_from_options_is_applied_on_load() {
        let options = DisplayOptions {
            background_color: "white".into(),
            ..DisplayOptions::default()
        };
        let mut viewer = Viewer::new(RecordingRenderer::default(), &options);
        viewer.set_background_color("black");
        assert!(viewer.renderer().calls.is_empty());
        viewer.load("HEADER").unwrap();
        assert!(viewer
            .renderer
            .take_calls()
            .contains(&Call::SetBackground("black".into())));

        viewer.set_background_color("rgb(255, 255, 255)");
        assert_eq!(viewer.background_color(), "rgb(255, 255, 255)");
        assert_eq!(
            viewer.renderer.take_calls(),
            vec![
                Call::SetBackground("rgb(255, 255, 255)".into()),
                Call::Render
            ]
        );
    }

    #[test]
    fn style_changes_before_load_touch_nothing() {
        let mut viewer =
            Viewer::new(RecordingRenderer::default(), &DisplayOptions::default());
        assert_eq!(viewer.cycle_style(), VisualizationStyle::Stick);
        viewer.reset_view();
        assert!(viewer.renderer().calls.is_empty());
    }

    #[test]
    fn surface_style_clears_then_adds_surface() {
        let mut viewer = loaded_viewer();
        viewer.set_style(VisualizationStyle::Surface);
        let calls = viewer.renderer.take_calls();
        assert_eq!(calls[0], Call::RemoveAllSurfaces);
        assert_eq!(calls[1], Call::SetStyle(None));
        assert!(matches!(
            &calls[3],
            Call::AddSurface(s) if s.kind == SurfaceKind::Vdw
        ));
        assert_eq!(calls.last(), Some(&Call::Render));
    }

    #[test]
    fn cycle_color_scheme_restyles() {
        let mut viewer = loaded_viewer();
        assert_eq!(viewer.cycle_color_scheme(), ColorScheme::Secondary);
        let calls = viewer.renderer.take_calls();
        let expected = build_style_spec(
            ColorScheme::Secondary,
            VisualizationStyle::Cartoon,
        );
        assert!(calls.contains(&Call::SetStyle(Some(expected.representation))));
    }

    #[test]
    fn clicks_ignored_until_measuring() {
        let mut viewer = loaded_viewer();
        viewer.renderer.picks.push_back(Some(origin()));
        assert_eq!(viewer.handle_click(1.0, 1.0), ClickOutcome::Ignored);
        assert_eq!(viewer.renderer.picks.len(), 1);

        assert!(viewer.toggle_measuring());
        assert_eq!(viewer.renderer.take_calls(), vec![Call::SetClickable(true)]);
    }

    #[test]
    fn two_clicks_make_a_labelled_measurement() {
        let mut viewer = loaded_viewer();
        let _ = viewer.toggle_measuring();
        let _ = viewer.renderer.take_calls();
        viewer.renderer.picks.push_back(Some(origin()));
        viewer.renderer.picks.push_back(None);
        viewer.renderer.picks.push_back(Some(three_four_zero()));

        assert_eq!(
            viewer.handle_click(0.0, 0.0),
            ClickOutcome::Pending(origin())
        );
        assert_eq!(viewer.handle_click(5.0, 5.0), ClickOutcome::Missed);
        let ClickOutcome::Measured(id) = viewer.handle_click(9.0, 9.0) else {
            panic!("expected a measurement");
        };
        assert_eq!(viewer.session().measurements()[0].id(), id);
        assert_eq!(viewer.label_count(), 1);
        assert!(viewer
            .renderer
            .calls
            .iter()
            .any(|c| matches!(c, Call::AddLabel(text, _) if text == "5.00 Å")));
    }

    #[test]
    fn removing_measurement_removes_only_its_label() {
        let mut viewer = loaded_viewer();
        let _ = viewer.toggle_measuring();
        for atom in [origin(), three_four_zero(), origin(), unit_diagonal()] {
            viewer.renderer.picks.push_back(Some(atom));
            let _ = viewer.handle_click(0.0, 0.0);
        }
        assert_eq!(viewer.label_count(), 2);
        let first = viewer.session().measurements()[0].id().to_owned();
        let _ = viewer.renderer.take_calls();

        assert!(viewer.remove_measurement(&first));
        assert!(!viewer.remove_measurement(&first));
        let calls = viewer.renderer.take_calls();
        assert_eq!(calls[0], Call::RemoveLabel(LabelHandle(1)));
        assert!(!calls.iter().any(|c| matches!(c, Call::AddLabel(..))));
        assert_eq!(viewer.label_count(), 1);

        viewer.clear_measurements();
        assert_eq!(viewer.label_count(), 0);
        assert!(viewer.session().is_active());
    }

    #[test]
    fn reload_drops_measurements() {
        let mut viewer = loaded_viewer();
        let _ = viewer.toggle_measuring();
        for atom in [origin(), three_four_zero()] {
            viewer.renderer.picks.push_back(Some(atom));
            let _ = viewer.handle_click(0.0, 0.0);
        }
        viewer.load("HEADER").unwrap();
        assert!(viewer.session().measurements().is_empty());
        assert_eq!(viewer.label_count(), 0);
        assert!(viewer.renderer.calls.contains(&Call::SetClickable(true)));
    }

    #[test]
    fn key_actions() {
        let mut viewer = loaded_viewer();
        assert!(viewer.handle_action(KeyAction::CycleStyle));
        assert_eq!(viewer.style(), VisualizationStyle::Stick);
        assert!(viewer.handle_action(KeyAction::ToggleMeasure));
        assert!(viewer.session().is_active());
        assert!(!viewer.handle_action(KeyAction::ToggleTheme));
        assert!(!viewer.handle_action(KeyAction::ExportImage));
    }

    #[test]
    fn snapshot_passes_through() {
        let mut viewer = loaded_viewer();
        viewer.renderer.png = vec![0x89, b'P', b'N', b'G'];
        assert_eq!(viewer.snapshot().unwrap(), vec![0x89, b'P', b'N', b'G']);
    }
}
