//! 场景配置模块
//!
//! 定义约束的场景输入：目标网格、被约束对象的变换，以及可选的吸附表面列表。
//!
//! # 配置文件格式 (scene.toml)
//!
//! ```toml
//! [mesh]
//! path = "assets/ground.obj"
//!
//! [target]
//! position = [0.3, 1.0, -0.2]
//!
//! [[surfaces]]
//! path = "assets/rock.obj"
//! transform = { position = [4.0, 0.0, 0.0] }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{ConfigError, Result, SoftNormalError};
use crate::math::{matrix, utils, Matrix4, Vector3};

/// 3D 变换数据
///
/// 包含位置、旋转和缩放信息。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transform {
    /// 位置 (x, y, z)
    #[serde(default = "default_position")]
    pub position: [f64; 3],

    /// 旋转（欧拉角，度数，XYZ 顺序）
    #[serde(default = "default_rotation")]
    pub rotation: [f64; 3],

    /// 缩放 (x, y, z)
    #[serde(default = "default_scale")]
    pub scale: [f64; 3],
}

fn default_position() -> [f64; 3] {
    [0.0, 0.0, 0.0]
}

fn default_rotation() -> [f64; 3] {
    [0.0, 0.0, 0.0]
}

fn default_scale() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: default_position(),
            rotation: default_rotation(),
            scale: default_scale(),
        }
    }
}

impl Transform {
    /// 只有平移的变换
    pub fn from_position(position: [f64; 3]) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// 创建世界矩阵
    ///
    /// 变换顺序：缩放 -> 旋转 -> 平移
    pub fn to_matrix(&self) -> Matrix4 {
        let euler = Vector3::new(
            utils::deg_to_rad(self.rotation[0]),
            utils::deg_to_rad(self.rotation[1]),
            utils::deg_to_rad(self.rotation[2]),
        );

        matrix::compose(
            &Vector3::from(self.position),
            &euler,
            &Vector3::from(self.scale),
        )
    }
}

/// 网格配置
///
/// 定义网格的文件路径和变换。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshConfig {
    /// 网格文件路径
    pub path: String,

    /// 网格变换（加载后把网格变换到世界空间）
    #[serde(default)]
    pub transform: Transform,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            path: "assets/ground.obj".to_string(),
            transform: Transform::default(),
        }
    }
}

/// 场景配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneConfig {
    /// 约束所贴合的网格
    #[serde(default)]
    pub mesh: MeshConfig,

    /// 被约束对象的世界变换，其平移分量是参考点
    #[serde(default)]
    pub target: Transform,

    /// 多表面最近点约束的候选表面（可为空）
    #[serde(default)]
    pub surfaces: Vec<MeshConfig>,
}

impl SceneConfig {
    /// 从文件加载场景配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| SoftNormalError::Config(ConfigError::FileNotFound(format!(
                "Failed to read scene config file '{}': {}",
                path.display(),
                e
            ))))?;

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 字符串解析
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| SoftNormalError::Config(ConfigError::ParseError(format!(
                "Failed to parse scene config: {}",
                e
            ))))
    }

    /// 从文件加载，如果文件不存在则返回默认配置
    ///
    /// 文件存在但无法读取或解析时返回错误。
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let config = Self::from_file(path)?;
            tracing::info!("Loaded scene config from: {}", path.display());
            Ok(config)
        } else {
            tracing::info!("Scene config not found, using defaults");
            Ok(Self::default())
        }
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let contents = toml::to_string_pretty(self)
            .map_err(|e| SoftNormalError::Config(ConfigError::ParseError(format!(
                "Failed to serialize scene config: {}",
                e
            ))))?;

        fs::write(path, contents)?;

        tracing::info!("Saved scene config to: {}", path.display());
        Ok(())
    }

    /// 从命令行参数覆盖场景
    ///
    /// 支持的参数：
    /// - `--mesh <path>`: 目标网格文件
    /// - `--position <x,y,z>`: 被约束对象的位置
    ///
    /// 参数值缺失或无法解析时返回 `ConfigError::InvalidValue`。
    pub fn apply_args<I>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        if let Some(idx) = args.iter().position(|a| a == "--mesh") {
            let path = args.get(idx + 1).ok_or_else(|| ConfigError::InvalidValue {
                field: "--mesh".to_string(),
                reason: "expected a file path".to_string(),
            })?;
            self.mesh.path = path.clone();
        }

        if let Some(idx) = args.iter().position(|a| a == "--position") {
            let value = args.get(idx + 1).map(String::as_str).unwrap_or_default();
            let position = parse_triple(value).ok_or_else(|| ConfigError::InvalidValue {
                field: "--position".to_string(),
                reason: format!("expected 'x,y,z', got '{}'", value),
            })?;
            self.target.position = position;
        }

        Ok(())
    }
}

/// 解析 "x,y,z" 形式的三元组
fn parse_triple(text: &str) -> Option<[f64; 3]> {
    let values: Vec<f64> = text
        .split(',')
        .map(|s| s.trim().parse().ok())
        .collect::<Option<_>>()?;

    match values.as_slice() {
        [x, y, z] => Some([*x, *y, *z]),
        _ => None,
    }
}
