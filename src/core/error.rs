//! 错误处理模块
//!
//! 定义了约束求解中使用的统一错误类型。
//!
//! # 设计原则
//!
//! - 手写 `Display` / `Error` / `From` 实现，不依赖派生宏
//! - 为每种错误类型提供清晰的上下文信息
//! - 支持错误链（error source）
//! - 易于模式匹配和错误处理
//!
//! 所有错误都在核心边界处检测并返回给宿主，宿主据此保留旧的输出值。

use std::fmt;
use std::path::PathBuf;

use crate::geometry::FaceIndex;

/// 统一的 Result 类型
///
/// 所有可能返回错误的函数都应该使用这个类型。
pub type Result<T> = std::result::Result<T, SoftNormalError>;

/// 约束求解的错误类型
#[derive(Debug)]
pub enum SoftNormalError {
    /// 面索引不存在于网格中（种子面或邻接面）
    InvalidIndex { face: FaceIndex, face_count: usize },

    /// 法线之和为零向量，无法确定方向
    DegenerateOrientation { face_count: usize },

    /// 必需的输入缺失（网格、变换、半径）
    MissingInput(&'static str),

    /// 半径不是正的有限值
    InvalidRadius(f64),

    /// 法线列表为空
    EmptyRegion,

    /// 变换矩阵不可逆
    SingularTransform,

    /// 配置错误
    Config(ConfigError),

    /// 网格加载错误
    MeshLoading(MeshLoadError),

    /// IO 错误
    Io(std::io::Error),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 网格加载相关的错误
#[derive(Debug)]
pub enum MeshLoadError {
    /// 文件不存在
    FileNotFound(PathBuf),

    /// 不支持的文件格式
    UnsupportedFormat(String),

    /// 解析失败
    ParseError(String),

    /// 几何数据无效
    InvalidGeometry(String),
}

impl fmt::Display for SoftNormalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoftNormalError::InvalidIndex { face, face_count } => {
                write!(f, "Invalid face index {} (mesh has {} faces)", face, face_count)
            }
            SoftNormalError::DegenerateOrientation { face_count } => write!(
                f,
                "Degenerate orientation: normals of {} faces sum to zero",
                face_count
            ),
            SoftNormalError::MissingInput(name) => write!(f, "Missing input: {}", name),
            SoftNormalError::InvalidRadius(r) => {
                write!(f, "Invalid radius {}: must be positive and finite", r)
            }
            SoftNormalError::EmptyRegion => write!(f, "Cannot resolve orientation of an empty region"),
            SoftNormalError::SingularTransform => write!(f, "Transform matrix is not invertible"),
            SoftNormalError::Config(e) => write!(f, "Configuration error: {}", e),
            SoftNormalError::MeshLoading(e) => write!(f, "Mesh loading error: {}", e),
            SoftNormalError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for MeshLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshLoadError::FileNotFound(path) => write!(f, "Mesh file not found: {}", path.display()),
            MeshLoadError::UnsupportedFormat(msg) => write!(f, "Unsupported mesh format: {}", msg),
            MeshLoadError::ParseError(msg) => write!(f, "Failed to parse mesh: {}", msg),
            MeshLoadError::InvalidGeometry(msg) => write!(f, "Invalid geometry data: {}", msg),
        }
    }
}

impl std::error::Error for SoftNormalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SoftNormalError::Io(e) => Some(e),
            SoftNormalError::Config(e) => Some(e),
            SoftNormalError::MeshLoading(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for MeshLoadError {}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for SoftNormalError {
    fn from(err: std::io::Error) -> Self {
        SoftNormalError::Io(err)
    }
}

impl From<ConfigError> for SoftNormalError {
    fn from(err: ConfigError) -> Self {
        SoftNormalError::Config(err)
    }
}

impl From<MeshLoadError> for SoftNormalError {
    fn from(err: MeshLoadError) -> Self {
        SoftNormalError::MeshLoading(err)
    }
}
