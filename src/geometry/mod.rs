/// 多边形网格模块
///
/// 提供约束求解所需的只读网格抽象和一个内存实现。
///
/// # 模块结构
///
/// - `query`: `MeshQuery` trait，核心算法对网格的全部需求
/// - `mesh`: `PolyMesh`，任意边数多边形网格（缓存法线、中心、邻接）
/// - `topology`: 基于共享边的面邻接构建
/// - `loaders`: 各种格式的模型加载器
///
/// # 架构设计
///
/// ```text
/// 文件 (OBJ)
///     ↓
/// Loader (ObjLoader)
///     ↓
/// PolyMesh (实现 MeshQuery)
///     ↓
/// constraint (区域收集 + 朝向求解)
/// ```
///
/// # 使用示例
///
/// ```rust,no_run
/// use soft_normal::geometry::loaders::{MeshLoader, ObjLoader};
/// use soft_normal::geometry::MeshQuery;
/// use std::path::Path;
///
/// let mesh = ObjLoader::load_from_file(Path::new("ground.obj"))?;
/// println!("面数: {}", mesh.face_count());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```

pub mod query;
pub mod mesh;
pub mod topology;
pub mod loaders;

/// 面索引
///
/// 只在对应网格句柄的生命周期内有效。
pub type FaceIndex = u32;

// 重新导出常用类型
pub use query::{ClosestPoint, MeshQuery};
pub use mesh::PolyMesh;
