/// 模型加载器模块
///
/// 提供统一的模型加载接口和各种格式的具体实现。
///
/// # 支持的格式
///
/// - **OBJ**: Wavefront OBJ 格式（使用 tobj crate）
///
/// # 使用示例
///
/// ```rust,no_run
/// use soft_normal::geometry::loaders::{MeshLoader, ObjLoader};
/// use std::path::Path;
///
/// let mesh = ObjLoader::load_from_file(Path::new("ground.obj"))?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
use crate::core::error::{MeshLoadError, Result};
use crate::geometry::mesh::PolyMesh;
use std::path::Path;

pub mod obj_loader;

// 重新导出加载器
pub use obj_loader::ObjLoader;

/// 网格加载器 trait
///
/// 定义统一的加载接口，所有格式的加载器都实现此 trait。
///
/// # 实现要求
///
/// - 加载器应该是无状态的（使用静态方法）
/// - 保留原始多边形（不三角化），否则面邻接会与建模时的拓扑不一致
/// - 正确处理错误情况并返回有意义的错误信息
pub trait MeshLoader {
    /// 从文件路径加载网格
    ///
    /// # 错误
    ///
    /// - 文件不存在或无法读取
    /// - 文件格式错误或损坏
    /// - 面索引越界
    fn load_from_file(path: &Path) -> Result<PolyMesh>;

    /// 从内存数据加载网格
    fn load_from_memory(data: &[u8]) -> Result<PolyMesh>;

    /// 获取支持的文件扩展名列表（小写，不含点号）
    fn supported_extensions() -> &'static [&'static str];
}

/// 根据文件扩展名选择合适的加载器
///
/// # 示例
///
/// ```rust,no_run
/// use soft_normal::geometry::loaders::load_mesh;
/// use std::path::Path;
///
/// let mesh = load_mesh(Path::new("ground.obj"))?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn load_mesh(path: &Path) -> Result<PolyMesh> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| {
            MeshLoadError::UnsupportedFormat(format!(
                "cannot determine file extension of '{}'",
                path.display()
            ))
        })?;

    match extension.as_str() {
        "obj" => ObjLoader::load_from_file(path),
        _ => Err(MeshLoadError::UnsupportedFormat(format!(".{}", extension)).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::SoftNormalError;

    #[test]
    fn test_supported_extensions() {
        let obj_exts = ObjLoader::supported_extensions();
        assert!(obj_exts.contains(&"obj"));
    }

    #[test]
    fn test_load_mesh_unknown_extension() {
        let result = load_mesh(Path::new("model.fbx"));
        assert!(matches!(
            result,
            Err(SoftNormalError::MeshLoading(MeshLoadError::UnsupportedFormat(_)))
        ));
    }

    #[test]
    fn test_load_mesh_without_extension() {
        assert!(load_mesh(Path::new("model")).is_err());
    }
}
