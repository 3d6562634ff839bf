//! Ratatui-based terminal UI.
//!
//! A settings panel edits the current trace's parameters; every change goes
//! through `TraceManager::set_parameters`, so the chart always shows what the
//! core computed. Keys `1`-`4` switch traces, `f`/`h` freeze or hide the
//! current one.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use plotters::style::RGBColor;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};
use tracing::{debug, warn};

use crate::cli::TuiArgs;
use crate::domain::{
    AMBIENT_B_NOISE_RANGE, AMPLITUDE_NOISE_RANGE, Architecture, CCW_ASYMMETRY_RANGE, Channel,
    ELECTRIC_NOISE_RANGE, FIXED_FREQUENCY_RANGE, GRADIENT_RANGE, MEAN_PHONON_RANGE, OptimizeMode,
    ParameterSet, RABI_POWER_RANGE, RawRange, SYMMETRIC_FLUCTUATION_RANGE, TraceId,
    VNoiseCorrelation, VOLTAGE_NOISE_RANGE, VibrationalMode, XY_CROSSTALK_RANGE,
};
use crate::error::AppError;
use crate::io::{BuiltinPreset, read_preset_file, write_preset_file};
use crate::models::constants::KHZ;
use crate::traces::{TraceManager, TraceView};

mod plotters_chart;

use plotters_chart::{ChartSeries, InfidelityChart};

/// Start the TUI.
pub fn run(args: TuiArgs) -> Result<(), AppError> {
    let mut app = App::new(args)?;

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::terminal(format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::terminal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::terminal(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

const TRACE_COLORS: [RGBColor; 4] = [
    RGBColor(0, 255, 255),
    RGBColor(255, 0, 255),
    RGBColor(255, 255, 0),
    RGBColor(0, 255, 0),
];

/// Channel curve colors, in `Channel::ALL` order.
const CHANNEL_COLORS: [RGBColor; 7] = [
    RGBColor(255, 99, 71),
    RGBColor(100, 149, 237),
    RGBColor(186, 85, 211),
    RGBColor(255, 165, 0),
    RGBColor(154, 205, 50),
    RGBColor(210, 180, 140),
    RGBColor(169, 169, 169),
];

const TRACE_TUI_COLORS: [Color; 4] = [Color::Cyan, Color::Magenta, Color::Yellow, Color::Green];

/// Editable settings, in panel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Gradient,
    RabiPower,
    ElectricNoise,
    AmbientBNoise,
    VoltageNoise,
    XyCrosstalk,
    AmplitudeStrength,
    CcwStrength,
    MeanPhonon,
    SymmetricFluctuation,
    FixedFrequency,
    Architecture,
    Mode,
    VNoise,
    AmpNoiseOn,
    CcwNoiseOn,
    SymFlucOn,
    OffResonantOn,
    PulseShapingOn,
    Optimize,
}

const FIELDS: [Field; 20] = [
    Field::Gradient,
    Field::RabiPower,
    Field::ElectricNoise,
    Field::AmbientBNoise,
    Field::VoltageNoise,
    Field::XyCrosstalk,
    Field::AmplitudeStrength,
    Field::CcwStrength,
    Field::MeanPhonon,
    Field::SymmetricFluctuation,
    Field::FixedFrequency,
    Field::Architecture,
    Field::Mode,
    Field::VNoise,
    Field::AmpNoiseOn,
    Field::CcwNoiseOn,
    Field::SymFlucOn,
    Field::OffResonantOn,
    Field::PulseShapingOn,
    Field::Optimize,
];

impl Field {
    fn label(self) -> &'static str {
        match self {
            Field::Gradient => "dB/dz (T/m)",
            Field::RabiPower => "Rabi power (kHz)",
            Field::ElectricNoise => "nu*S_E (dec)",
            Field::AmbientBNoise => "S_B ambient (dec)",
            Field::VoltageNoise => "S_V (dec)",
            Field::XyCrosstalk => "xy detuning (0.1 MHz)",
            Field::AmplitudeStrength => "amp noise (dec)",
            Field::CcwStrength => "ccw noise (dec)",
            Field::MeanPhonon => "nbar (dec)",
            Field::SymmetricFluctuation => "sym fluc (Hz)",
            Field::FixedFrequency => "fixed nu (kHz)",
            Field::Architecture => "architecture",
            Field::Mode => "vib. mode",
            Field::VNoise => "V noise",
            Field::AmpNoiseOn => "include amp noise",
            Field::CcwNoiseOn => "include ccw noise",
            Field::SymFlucOn => "include sym fluc",
            Field::OffResonantOn => "include off-res",
            Field::PulseShapingOn => "pulse shaping",
            Field::Optimize => "optimize",
        }
    }

    fn slider(self, p: &mut ParameterSet) -> Option<(&mut i32, RawRange)> {
        let slot = match self {
            Field::Gradient => (&mut p.gradient, GRADIENT_RANGE),
            Field::RabiPower => (&mut p.rabi_power, RABI_POWER_RANGE),
            Field::ElectricNoise => (&mut p.electric_noise_psd, ELECTRIC_NOISE_RANGE),
            Field::AmbientBNoise => (&mut p.ambient_b_noise_psd, AMBIENT_B_NOISE_RANGE),
            Field::VoltageNoise => (&mut p.voltage_noise_psd, VOLTAGE_NOISE_RANGE),
            Field::XyCrosstalk => (&mut p.xy_crosstalk, XY_CROSSTALK_RANGE),
            Field::AmplitudeStrength => (&mut p.amplitude_noise_strength, AMPLITUDE_NOISE_RANGE),
            Field::CcwStrength => (&mut p.ccw_asymmetry_noise, CCW_ASYMMETRY_RANGE),
            Field::MeanPhonon => (&mut p.mean_phonon_number, MEAN_PHONON_RANGE),
            Field::SymmetricFluctuation => {
                (&mut p.symmetric_freq_fluctuation, SYMMETRIC_FLUCTUATION_RANGE)
            }
            Field::FixedFrequency => (&mut p.fixed_frequency, FIXED_FREQUENCY_RANGE),
            _ => return None,
        };
        Some(slot)
    }

    fn value(self, p: &ParameterSet) -> String {
        let on_off = |b: bool| if b { "on" } else { "off" }.to_string();
        let mut scratch = p.clone();
        if let Some((v, _)) = self.slider(&mut scratch) {
            return v.to_string();
        }
        match self {
            Field::Architecture => p.architecture.display_name().to_string(),
            Field::Mode => p.vibrational_mode.display_name().to_string(),
            Field::VNoise => p.vnoise_correlation.display_name().to_string(),
            Field::AmpNoiseOn => on_off(p.toggles.amplitude_noise),
            Field::CcwNoiseOn => on_off(p.toggles.ccw_noise),
            Field::SymFlucOn => on_off(p.toggles.symmetric_fluctuation),
            Field::OffResonantOn => on_off(p.toggles.off_resonant),
            Field::PulseShapingOn => on_off(p.toggles.pulse_shaping),
            Field::Optimize => match p.optimize {
                OptimizeMode::Search => "search".to_string(),
                OptimizeMode::Fixed => "fixed".to_string(),
            },
            _ => String::new(),
        }
    }

    /// Parameters after moving this field by `delta`. Sliders stop at their range ends.
    fn adjust(self, p: &ParameterSet, delta: i32) -> ParameterSet {
        let mut next = p.clone();
        if let Some((v, range)) = self.slider(&mut next) {
            *v = (*v + delta).clamp(range.min, range.max);
            return next;
        }
        match self {
            Field::Architecture => {
                next.architecture = match next.architecture {
                    Architecture::Chip => Architecture::Macro,
                    Architecture::Macro => Architecture::Chip,
                }
            }
            Field::Mode => {
                next.vibrational_mode = match next.vibrational_mode {
                    VibrationalMode::AxialCom => VibrationalMode::AxialStretch,
                    VibrationalMode::AxialStretch => VibrationalMode::AxialCom,
                }
            }
            Field::VNoise => {
                next.vnoise_correlation = match next.vnoise_correlation {
                    VNoiseCorrelation::Correlated => VNoiseCorrelation::Uncorrelated,
                    VNoiseCorrelation::Uncorrelated => VNoiseCorrelation::Correlated,
                }
            }
            Field::AmpNoiseOn => next.toggles.amplitude_noise ^= true,
            Field::CcwNoiseOn => next.toggles.ccw_noise ^= true,
            Field::SymFlucOn => next.toggles.symmetric_fluctuation ^= true,
            Field::OffResonantOn => next.toggles.off_resonant ^= true,
            Field::PulseShapingOn => next.toggles.pulse_shaping ^= true,
            Field::Optimize => next.optimize = flip_optimize(next.optimize),
            _ => {}
        }
        next
    }
}

fn flip_optimize(mode: OptimizeMode) -> OptimizeMode {
    match mode {
        OptimizeMode::Search => OptimizeMode::Fixed,
        OptimizeMode::Fixed => OptimizeMode::Search,
    }
}

struct App {
    manager: TraceManager,
    selected_field: usize,
    status: String,
    preset_path: PathBuf,
    show_channels: bool,
}

impl App {
    fn new(args: TuiArgs) -> Result<Self, AppError> {
        let grid = crate::app::grid_from_args(&args.grid)?;
        let params = crate::app::params_from_args(&args.params)?;
        Ok(Self {
            manager: TraceManager::new(grid, params)?,
            selected_field: 0,
            status: "Ready.".to_string(),
            preset_path: args.preset_path,
            show_channels: true,
        })
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::terminal(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::terminal(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::terminal(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        let result = match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected_field = self.selected_field.saturating_sub(1);
                Ok(())
            }
            KeyCode::Down => {
                self.selected_field = (self.selected_field + 1).min(FIELDS.len() - 1);
                Ok(())
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::PageDown => self.adjust_field(-10),
            KeyCode::PageUp => self.adjust_field(10),
            KeyCode::Char(c @ '1'..='4') => self.select_trace(c as usize - '1' as usize),
            KeyCode::Char('f') => self.toggle_frozen(),
            KeyCode::Char('h') => self.toggle_hidden(),
            KeyCode::Char('v') => {
                self.show_channels = !self.show_channels;
                self.status = format!("Channel curves {}.", if self.show_channels { "on" } else { "off" });
                Ok(())
            }
            KeyCode::Char('o') => {
                let mut next = self.manager.editor().clone();
                next.optimize = flip_optimize(next.optimize);
                self.apply(next)
            }
            KeyCode::Char('c') => self.load_builtin(BuiltinPreset::Chip),
            KeyCode::Char('m') => self.load_builtin(BuiltinPreset::Macro),
            KeyCode::Char('s') => self.save_preset(),
            KeyCode::Char('l') => self.load_preset(),
            _ => Ok(()),
        };

        if let Err(err) = result {
            warn!(error = %err, "tui action failed");
            self.status = format!("Error: {err}");
        }
        false
    }

    fn adjust_field(&mut self, delta: i32) -> Result<(), AppError> {
        let field = FIELDS[self.selected_field];
        let next = field.adjust(self.manager.editor(), delta);
        if &next == self.manager.editor() {
            return Ok(());
        }
        self.apply(next)?;
        self.status = format!("{}: {}", field.label(), field.value(self.manager.editor()));
        Ok(())
    }

    fn apply(&mut self, params: ParameterSet) -> Result<(), AppError> {
        let id = self.manager.current();
        let (_, point) = self.manager.set_parameters(id, params)?;
        debug!(trace = %id, infidelity = point.infidelity, "tui recompute");
        self.status = format!(
            "{id}: {:.3} % @ {:.1} kHz",
            point.fidelity() * 100.0,
            point.frequency / KHZ
        );
        Ok(())
    }

    fn select_trace(&mut self, index: usize) -> Result<(), AppError> {
        let id = TraceId::new(index)?;
        let existed = self.manager.trace(id).is_some();
        self.manager.select_trace(id)?;
        self.status = if existed {
            format!("Switched to {id}.")
        } else {
            format!("Created {id} from current settings.")
        };
        Ok(())
    }

    fn toggle_frozen(&mut self) -> Result<(), AppError> {
        let id = self.manager.current();
        let frozen = self.manager.trace(id).is_some_and(|t| t.flags.frozen);
        self.manager.set_trace_flags(id, Some(!frozen), None)?;
        self.status = format!("{id} {}.", if frozen { "live" } else { "frozen" });
        Ok(())
    }

    fn toggle_hidden(&mut self) -> Result<(), AppError> {
        let id = self.manager.current();
        let hidden = self.manager.trace(id).is_some_and(|t| t.flags.hidden);
        self.manager.set_trace_flags(id, None, Some(!hidden))?;
        self.status = format!("{id} {}.", if hidden { "shown" } else { "hidden" });
        Ok(())
    }

    fn load_builtin(&mut self, preset: BuiltinPreset) -> Result<(), AppError> {
        self.manager.load_preset(preset.json())?;
        self.status = format!("Loaded {preset:?} preset.");
        Ok(())
    }

    fn save_preset(&mut self) -> Result<(), AppError> {
        write_preset_file(&self.preset_path, self.manager.editor())?;
        self.status = format!("Saved preset to {}.", self.preset_path.display());
        Ok(())
    }

    fn load_preset(&mut self) -> Result<(), AppError> {
        let params = read_preset_file(&self.preset_path)?;
        self.apply(params)?;
        self.status = format!("Loaded preset from {}.", self.preset_path.display());
        Ok(())
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(7), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = vec![Line::from(vec![
            Span::styled("hydra", Style::default().fg(Color::Cyan)),
            Span::raw(" - two-qubit gate infidelity vs trap frequency"),
        ])];

        for (i, id) in TraceId::ALL.into_iter().enumerate() {
            let current = if id == self.manager.current() { "»" } else { " " };
            let text = match self.manager.trace(id) {
                None => format!("{current} {id}: -"),
                Some(t) => format!(
                    "{current} {id}: {:.3} % @ {:.1} kHz | t_g {:.3} ms | ndot {:.3}/s{}{}",
                    t.point.fidelity() * 100.0,
                    t.point.frequency / KHZ,
                    t.point.gate_time * 1e3,
                    t.point.heating_rate,
                    if t.flags.frozen { " [frozen]" } else { "" },
                    if t.flags.hidden { " [hidden]" } else { "" },
                ),
            };
            lines.push(Line::from(Span::styled(text, Style::default().fg(TRACE_TUI_COLORS[i]))));
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(36)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_settings(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title(self.chart_title()).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let (series, x_bounds, y_bounds) = chart_series(&self.manager, self.show_channels);
        if series.is_empty() {
            let msg = Paragraph::new("All traces hidden.").style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        }

        let (chart_rect, insets) = chart_layout(inner);
        let widget = InfidelityChart {
            series: &series,
            x_bounds,
            y_bounds,
            x_label: "nu (kHz)",
            y_label: "log10(1-F)",
            fmt_x: fmt_axis_khz,
            fmt_y: fmt_axis_log,
        };
        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, inner, chart_rect, insets, x_bounds, y_bounds);
        }
    }

    fn chart_title(&self) -> Line<'static> {
        let mut spans = vec![Span::raw("Infidelity")];
        let Some(trace) = self.manager.current_trace().filter(|t| !t.flags.hidden) else {
            return Line::from(spans);
        };
        if !self.show_channels {
            return Line::from(spans);
        }
        spans.push(Span::raw(format!(" | {}:", self.manager.current())));
        for curve in trace.breakdown.active_channels() {
            let RGBColor(r, g, b) = channel_color(curve.channel);
            spans.push(Span::styled(
                format!(" {}", curve.channel.label()),
                Style::default().fg(Color::Rgb(r, g, b)),
            ));
        }
        Line::from(spans)
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let editor = self.manager.editor();
        let items: Vec<ListItem> = FIELDS
            .iter()
            .map(|f| ListItem::new(format!("{:<22}{}", f.label(), f.value(editor))))
            .collect();

        let frozen = self.manager.current_trace().is_some_and(|t| t.flags.frozen);
        let title = format!(
            "Settings ({}{})",
            self.manager.current(),
            if frozen { ", frozen" } else { "" }
        );
        let list = List::new(items)
            .block(Block::default().title(title).borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ field  ←/→ adjust  1-4 trace  f freeze  h hide  v channels  o optimize  c/m preset  s/l save/load  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn channel_color(channel: Channel) -> RGBColor {
    let i = Channel::ALL.iter().position(|&c| c == channel).unwrap_or(0);
    CHANNEL_COLORS[i]
}

fn log_points(frequencies: &[f64], values: &[f64]) -> Vec<(f64, f64)> {
    frequencies
        .iter()
        .zip(values)
        .filter(|&(_, &e)| e > 0.0)
        .map(|(&f, &e)| (f / KHZ, e.log10()))
        .collect()
}

/// Visible traces as chart series plus shared bounds.
///
/// Channel curves of the current trace come first so the totals draw on top.
fn chart_series(manager: &TraceManager, channels: bool) -> (Vec<ChartSeries>, [f64; 2], [f64; 2]) {
    let mut series = Vec::new();
    if channels {
        if let TraceView::Shown(trace) = manager.view(manager.current()) {
            for curve in trace.breakdown.active_channels() {
                series.push(ChartSeries {
                    points: log_points(&trace.breakdown.frequencies, &curve.values),
                    marker: None,
                    color: channel_color(curve.channel),
                });
            }
        }
    }
    for (i, id) in TraceId::ALL.into_iter().enumerate() {
        let TraceView::Shown(trace) = manager.view(id) else {
            continue;
        };
        let points = log_points(&trace.breakdown.frequencies, &trace.breakdown.total);
        let marker = (trace.point.infidelity > 0.0)
            .then(|| (trace.point.frequency / KHZ, trace.point.infidelity.log10()));
        series.push(ChartSeries {
            points,
            marker,
            color: TRACE_COLORS[i],
        });
    }

    let x_bounds = [
        manager.grid().first() / KHZ,
        manager.grid().last() / KHZ,
    ];

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in series.iter().flat_map(|s| s.points.iter()) {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        y_min = -6.0;
        y_max = 0.0;
    }
    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);

    (series, x_bounds, [y_min - pad, y_max + pad])
}

fn fmt_axis_khz(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_axis_log(v: f64) -> String {
    format!("{v:.1}")
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 7,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10 || inner.height <= insets.top + insets.bottom + 5 {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };
    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
) {
    const TICKS: usize = 5;
    let style = Style::default().fg(Color::Gray);
    let bottom = chart.y + chart.height;

    if bottom < inner.y + inner.height - 1 {
        for i in 0..TICKS {
            let u = i as f64 / (TICKS as f64 - 1.0);
            let label = fmt_axis_khz(x_bounds[0] + u * (x_bounds[1] - x_bounds[0]));
            let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
            let rect = Rect {
                x: x.saturating_sub(label.len() as u16 / 2),
                y: bottom,
                width: label.len() as u16,
                height: 1,
            };
            frame.render_widget(Paragraph::new(label).style(style), rect);
        }
    }

    for i in 0..TICKS {
        let u = i as f64 / (TICKS as f64 - 1.0);
        let label = fmt_axis_log(y_bounds[0] + u * (y_bounds[1] - y_bounds[0]));
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let start = (inner.x + insets.left.saturating_sub(1)).saturating_sub(label.len() as u16);
        if start < inner.x {
            continue;
        }
        let rect = Rect {
            x: start,
            y,
            width: label.len() as u16,
            height: 1,
        };
        frame.render_widget(Paragraph::new(label).style(style), rect);
    }

    let x_rect = Rect {
        x: chart.x,
        y: bottom + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        let x_label = Paragraph::new("nu (kHz)").alignment(Alignment::Center).style(style);
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new("log10(1-F)").style(style.add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: insets.left.saturating_sub(1),
        height: 1,
    };
    frame.render_widget(y_label, y_rect);
}
