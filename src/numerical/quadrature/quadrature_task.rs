//! An integration problem with its run settings, read from a task document such as
//!
//! ```text
//! equal_interval
//!     equation: "x**2 + 3*x + 2"
//!     x0: 0
//!     xn: 2
//!     h: 0.5
//! settings
//!     loglevel: info
//!     save_csv: samples.csv
//!     plot: true
//! ```
//!
//! `save_csv` writes comma separated samples, or tab separated ones for a `.txt` or `.tsv` path.
//!
//! or, for tabulated data, `unequal_interval x_values: 0, 1, 1.5, 2 y_values: 0, 1, 2.25, 4`.
//! A list may also be given as one quoted string of numbers: `x_values: "0 1 1.5 2"`.
use crate::Utils::logger::{
    init_logger, level_filter, save_grid_to_csv, save_grid_to_file, timestamped_log_name,
};
use crate::Utils::plots::{PlotError, plot_integral, plot_samples};
use crate::Utils::task_parser::{SectionMap, Value, parse_document_as};
use crate::numerical::quadrature::integrand::{ExpressionIntegrand, Integrand};
use crate::numerical::quadrature::quadrature_api::{compute_unequal_interval, integrate_equal_interval};
use crate::numerical::quadrature::quadrature_errors::QuadratureError;
use crate::numerical::quadrature::rule_selection::QuadratureRule;
use crate::numerical::quadrature::sample_grid::SampleGrid;
use log::{LevelFilter, error, info};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const EQUAL_INTERVAL: &str = "equal_interval";
const UNEQUAL_INTERVAL: &str = "unequal_interval";
const SETTINGS: &str = "settings";
const DEFAULT_PLOT_FILE: &str = "integral.png";
const DEFAULT_CSV_FILE: &str = "integral.csv";

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("failed to read task document: {0}")]
    Document(String),
    #[error("unknown section '{0}', expected equal_interval, unequal_interval or settings")]
    UnknownSection(String),
    #[error("task must contain exactly one of the sections 'equal_interval' and 'unequal_interval'")]
    ProblemSection,
    #[error("unknown field '{key}' in section '{section}'")]
    UnknownField { section: String, key: String },
    #[error("missing field '{key}' in section '{section}'")]
    MissingField { section: String, key: String },
    #[error("invalid value of '{key}' in section '{section}': {reason}")]
    InvalidField {
        section: String,
        key: String,
        reason: String,
    },
    #[error("'{token}' (value #{position}) is not a number")]
    InvalidNumber { token: String, position: usize },
    #[error("unknown log level '{0}', expected debug, info, warn, error, off or none")]
    LogLevel(String),
    #[error(transparent)]
    Quadrature(#[from] QuadratureError),
    #[error(transparent)]
    Plot(#[from] PlotError),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Splits text such as "0 1 1.5 2" or "0, 1, 1.5, 2" into numbers.
pub fn parse_number_list(text: &str) -> Result<Vec<f64>, TaskError> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(position, token)| {
            token.parse::<f64>().map_err(|_| TaskError::InvalidNumber {
                token: token.to_string(),
                position,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum IntegrationProblem {
    /// `equation` integrated from `x0` to `xn` with step `h`; `y` is held constant if given.
    EqualInterval {
        equation: String,
        x0: f64,
        xn: f64,
        h: f64,
        y_const: Option<f64>,
    },
    /// tabulated data integrated with the trapezoidal rule
    UnequalInterval { x_values: Vec<f64>, y_values: Vec<f64> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskSettings {
    pub loglevel: LevelFilter,
    pub log_file: Option<PathBuf>,
    pub plot_file: Option<PathBuf>,
    pub save_csv: Option<PathBuf>,
}

impl Default for TaskSettings {
    fn default() -> Self {
        Self {
            loglevel: LevelFilter::Info,
            log_file: None,
            plot_file: None,
            save_csv: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskReport {
    pub value: f64,
    pub rule: QuadratureRule,
    pub intervals: usize,
    /// which rule was used and why
    pub message: String,
    /// files written by the run
    pub artifacts: Vec<PathBuf>,
}

impl fmt::Display for TaskReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\nThe integral value is: {}", self.message, self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationTask {
    pub problem: IntegrationProblem,
    pub settings: TaskSettings,
}

impl IntegrationTask {
    pub fn new(problem: IntegrationProblem) -> Self {
        Self {
            problem,
            settings: TaskSettings::default(),
        }
    }

    pub fn equal_interval(equation: &str, x0: f64, xn: f64, h: f64, y_const: Option<f64>) -> Self {
        Self::new(IntegrationProblem::EqualInterval {
            equation: equation.to_string(),
            x0,
            xn,
            h,
            y_const,
        })
    }

    pub fn unequal_interval(x_values: Vec<f64>, y_values: Vec<f64>) -> Self {
        Self::new(IntegrationProblem::UnequalInterval { x_values, y_values })
    }

    pub fn with_settings(mut self, settings: TaskSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn from_document(document: &str) -> Result<Self, TaskError> {
        let doc = parse_document_as(document).map_err(TaskError::Document)?;
        if let Some(title) = doc
            .keys()
            .find(|title| ![EQUAL_INTERVAL, UNEQUAL_INTERVAL, SETTINGS].contains(&title.as_str()))
        {
            return Err(TaskError::UnknownSection(title.clone()));
        }
        let problem = match (doc.get(EQUAL_INTERVAL), doc.get(UNEQUAL_INTERVAL)) {
            (Some(section), None) => equal_interval_problem(section)?,
            (None, Some(section)) => unequal_interval_problem(section)?,
            _ => return Err(TaskError::ProblemSection),
        };
        let settings = match doc.get(SETTINGS) {
            Some(section) => task_settings(section)?,
            None => TaskSettings::default(),
        };
        Ok(Self { problem, settings })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TaskError> {
        let document = fs::read_to_string(path)?;
        Self::from_document(&document)
    }

    /// Installs the logger from the settings, then runs the task.
    pub fn solve(&self) -> Result<TaskReport, TaskError> {
        init_logger(self.settings.loglevel, self.settings.log_file.as_deref())?;
        let report = self.run();
        if let Err(e) = &report {
            error!("{}", e);
        }
        report
    }

    /// Integrates and writes the requested csv and plot files.
    pub fn run(&self) -> Result<TaskReport, TaskError> {
        match &self.problem {
            IntegrationProblem::EqualInterval {
                equation,
                x0,
                xn,
                h,
                y_const,
            } => {
                let integrand =
                    ExpressionIntegrand::from_text(equation, *y_const).map_err(QuadratureError::from)?;
                let outcome = integrate_equal_interval(&integrand, *x0, *xn, *h)?;
                let artifacts = self.export(&outcome.grid, |path| {
                    plot_integral(&integrand, &outcome.grid, &integrand.name(), path)
                })?;
                Ok(TaskReport {
                    value: outcome.value,
                    rule: outcome.rule,
                    intervals: outcome.intervals,
                    message: outcome.reason(),
                    artifacts,
                })
            }
            IntegrationProblem::UnequalInterval { x_values, y_values } => {
                let value = compute_unequal_interval(x_values, y_values)?;
                let grid = SampleGrid::from_pairs(x_values, y_values)?;
                let artifacts = self.export(&grid, |path| {
                    plot_samples(&grid, "trapezoidal rule for unequal intervals", path)
                })?;
                Ok(TaskReport {
                    value,
                    rule: QuadratureRule::Trapezoidal,
                    intervals: grid.intervals(),
                    message: format!("Using {} for unequal intervals.", QuadratureRule::Trapezoidal),
                    artifacts,
                })
            }
        }
    }

    fn export(
        &self,
        grid: &SampleGrid,
        plot: impl FnOnce(&Path) -> Result<(), PlotError>,
    ) -> Result<Vec<PathBuf>, TaskError> {
        let mut artifacts = Vec::new();
        if let Some(path) = &self.settings.save_csv {
            // .txt and .tsv get tab separated columns, anything else csv
            match path.extension().and_then(|ext| ext.to_str()) {
                Some("txt") | Some("tsv") => save_grid_to_file(grid, "f(x)", path)?,
                _ => save_grid_to_csv(grid, "f(x)", path)?,
            }
            info!("samples saved to {}", path.display());
            artifacts.push(path.clone());
        }
        if let Some(path) = &self.settings.plot_file {
            plot(path)?;
            artifacts.push(path.clone());
        }
        Ok(artifacts)
    }
}

fn check_keys(section: &SectionMap, name: &str, allowed: &[&str]) -> Result<(), TaskError> {
    match section.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(TaskError::UnknownField {
            section: name.to_string(),
            key: key.clone(),
        }),
        None => Ok(()),
    }
}

fn invalid(name: &str, key: &str, reason: String) -> TaskError {
    TaskError::InvalidField {
        section: name.to_string(),
        key: key.to_string(),
        reason,
    }
}

fn single<'a>(section: &'a SectionMap, name: &str, key: &str) -> Result<Option<&'a Value>, TaskError> {
    match section.get(key).map(|values| values.as_slice()) {
        None => Ok(None),
        Some([value]) => Ok(Some(value)),
        Some(values) => Err(invalid(
            name,
            key,
            format!("expected a single value, got {}", values.len()),
        )),
    }
}

fn required<'a>(section: &'a SectionMap, name: &str, key: &str) -> Result<&'a Value, TaskError> {
    single(section, name, key)?.ok_or_else(|| TaskError::MissingField {
        section: name.to_string(),
        key: key.to_string(),
    })
}

fn float_value(value: &Value, name: &str, key: &str) -> Result<f64, TaskError> {
    value
        .as_float()
        .ok_or_else(|| invalid(name, key, format!("'{}' is not a number", value)))
}

/// Either a comma separated list of numbers or one string of numbers.
fn number_list(section: &SectionMap, name: &str, key: &str) -> Result<Vec<f64>, TaskError> {
    let values = section.get(key).ok_or_else(|| TaskError::MissingField {
        section: name.to_string(),
        key: key.to_string(),
    })?;
    match values.as_slice() {
        [Value::String(text)] => parse_number_list(text),
        values => values
            .iter()
            .map(|value| float_value(value, name, key))
            .collect(),
    }
}

/// `true` gives the default path, `false` none, anything else is taken as the path.
fn optional_path(value: Option<&Value>, default: impl FnOnce() -> String) -> Option<PathBuf> {
    match value {
        None | Some(Value::Boolean(false)) => None,
        Some(Value::Boolean(true)) => Some(PathBuf::from(default())),
        Some(other) => Some(PathBuf::from(other.to_string())),
    }
}

fn equal_interval_problem(section: &SectionMap) -> Result<IntegrationProblem, TaskError> {
    let name = EQUAL_INTERVAL;
    check_keys(section, name, &["equation", "x0", "xn", "h", "y"])?;
    let equation = required(section, name, "equation")?.to_string();
    let x0 = float_value(required(section, name, "x0")?, name, "x0")?;
    let xn = float_value(required(section, name, "xn")?, name, "xn")?;
    let h = float_value(required(section, name, "h")?, name, "h")?;
    let y_const = match single(section, name, "y")? {
        Some(value) => Some(float_value(value, name, "y")?),
        None => None,
    };
    Ok(IntegrationProblem::EqualInterval {
        equation,
        x0,
        xn,
        h,
        y_const,
    })
}

fn unequal_interval_problem(section: &SectionMap) -> Result<IntegrationProblem, TaskError> {
    let name = UNEQUAL_INTERVAL;
    check_keys(section, name, &["x_values", "y_values"])?;
    Ok(IntegrationProblem::UnequalInterval {
        x_values: number_list(section, name, "x_values")?,
        y_values: number_list(section, name, "y_values")?,
    })
}

fn task_settings(section: &SectionMap) -> Result<TaskSettings, TaskError> {
    let name = SETTINGS;
    check_keys(
        section,
        name,
        &["loglevel", "log_file", "plot", "plot_file", "save_csv"],
    )?;
    let loglevel = match single(section, name, "loglevel")? {
        Some(value) => {
            let level = value.to_string();
            level_filter(&level).ok_or(TaskError::LogLevel(level))?
        }
        None => LevelFilter::Info,
    };
    let log_file = optional_path(single(section, name, "log_file")?, timestamped_log_name);
    let plot = match single(section, name, "plot")? {
        Some(value) => Some(
            value
                .as_boolean()
                .ok_or_else(|| invalid(name, "plot", format!("'{}' is not true or false", value)))?,
        ),
        None => None,
    };
    let plot_file = match (plot, single(section, name, "plot_file")?) {
        (Some(false), _) => None,
        (_, Some(value)) => Some(PathBuf::from(value.to_string())),
        (Some(true), None) => Some(PathBuf::from(DEFAULT_PLOT_FILE)),
        (None, None) => None,
    };
    let save_csv = optional_path(single(section, name, "save_csv")?, || {
        DEFAULT_CSV_FILE.to_string()
    });
    Ok(TaskSettings {
        loglevel,
        log_file,
        plot_file,
        save_csv,
    })
}
