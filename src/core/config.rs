//! 配置管理模块
//!
//! 提供约束参数和日志配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [constraint]
//! radius = 1.0                    # (0.1, 10.0]
//! reference_axis = [0.0, 1.0, 0.0]
//! on_degenerate = "fail"          # 或 "fallback"
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//! log_file = "soft_normal.log"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};
use crate::math::Vector3;

/// 宿主暴露的半径下限（不含）
pub const RADIUS_MIN: f64 = 0.1;

/// 宿主暴露的半径上限（含）
pub const RADIUS_MAX: f64 = 10.0;

/// 程序配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 约束配置
    #[serde(default)]
    pub constraint: ConstraintConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 约束配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintConfig {
    /// 面收集半径
    #[serde(default = "default_radius")]
    pub radius: f64,

    /// 参考轴（旋转前的“上”方向）
    #[serde(default = "default_reference_axis")]
    pub reference_axis: [f64; 3],

    /// 法线之和为零时的处理方式
    #[serde(default)]
    pub on_degenerate: DegeneratePolicy,
}

/// 退化朝向的处理策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegeneratePolicy {
    /// 计算失败，宿主保留旧输出
    #[default]
    Fail,
    /// 发布参考轴（零旋转）并标记为退化
    Fallback,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_radius() -> f64 { 1.0 }
fn default_reference_axis() -> [f64; 3] { [0.0, 1.0, 0.0] }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "soft_normal.log".to_string() }

impl Default for ConstraintConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            reference_axis: default_reference_axis(),
            on_degenerate: DegeneratePolicy::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl ConstraintConfig {
    /// 参考轴向量
    pub fn reference_axis(&self) -> Vector3 {
        Vector3::from(self.reference_axis)
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use soft_normal::core::Config;
    ///
    /// let config = Config::from_file("config.toml")?;
    /// # Ok::<(), soft_normal::core::SoftNormalError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 字符串解析
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在则使用默认配置
    ///
    /// 文件存在但无法读取或解析时返回错误，不会退回默认值。
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--radius <value>`: 设置收集半径
    /// - `--fallback`: 退化朝向时发布参考轴而不是失败
    /// - `--verbose`: 日志级别设为 debug
    ///
    /// 参数值缺失或无法解析时返回 `ConfigError::InvalidValue`，配置保持不变。
    pub fn apply_args<I>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        if let Some(idx) = args.iter().position(|a| a == "--radius") {
            let value = args.get(idx + 1).map(String::as_str).unwrap_or_default();
            let radius: f64 = value.parse().map_err(|_| ConfigError::InvalidValue {
                field: "--radius".to_string(),
                reason: format!("expected a number, got '{}'", value),
            })?;
            self.constraint.radius = radius;
        }

        if args.iter().any(|a| a == "--fallback") {
            self.constraint.on_degenerate = DegeneratePolicy::Fallback;
        }

        if args.iter().any(|a| a == "--verbose") {
            self.logging.level = LogLevel::Debug;
        }

        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        let radius = self.constraint.radius;
        if !(radius > RADIUS_MIN && radius <= RADIUS_MAX) {
            return Err(ConfigError::InvalidValue {
                field: "constraint.radius".to_string(),
                reason: format!("must be in ({}, {}], got {}", RADIUS_MIN, RADIUS_MAX, radius),
            }.into());
        }

        let axis = self.constraint.reference_axis();
        if !axis.iter().all(|c| c.is_finite()) || axis.norm() <= crate::math::constants::EPSILON {
            return Err(ConfigError::InvalidValue {
                field: "constraint.reference_axis".to_string(),
                reason: "must be a finite, non-zero vector".to_string(),
            }.into());
        }

        Ok(())
    }
}
