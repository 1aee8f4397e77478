//! 核心功能模块
//!
//! 本模块提供约束求解的基础设施，包括日志系统、配置管理、场景描述和错误处理。
//! 这些模块与具体的求解算法解耦。
//!
//! # 模块组织
//!
//! - `log`：日志系统，提供结构化的日志记录功能
//! - `config`：配置管理，支持从配置文件加载约束参数
//! - `scene`：场景配置，描述网格路径和被约束对象的变换
//! - `error`：错误处理，定义统一的错误类型

pub mod log;
pub mod config;
pub mod scene;
pub mod error;

// 重新导出常用类型，方便使用
pub use error::{Result, SoftNormalError, ConfigError, MeshLoadError};
pub use config::{Config, ConstraintConfig, DegeneratePolicy};
pub use scene::{SceneConfig, Transform};
