/// OBJ 文件加载器
///
/// 使用 tobj crate 加载 Wavefront OBJ 格式的多边形网格。
/// 只读取顶点位置和面，面法线与面邻接由 `PolyMesh` 自行计算。
use super::MeshLoader;
use crate::core::error::{MeshLoadError, Result};
use crate::geometry::mesh::PolyMesh;
use crate::math::Point3;
use std::io::BufReader;
use std::path::Path;

/// OBJ 格式加载器
///
/// # 特性
///
/// - 不三角化：保留原始 n 边形，面邻接与建模拓扑一致
/// - 使用位置索引（不按 UV/法线拆分顶点），否则共享边会断开
/// - 多个对象合并为一个网格，各自的顶点索引加上偏移
/// - 忽略材质、点和线元素
///
/// # 使用示例
///
/// ```rust,no_run
/// use soft_normal::geometry::loaders::{MeshLoader, ObjLoader};
/// use soft_normal::geometry::MeshQuery;
/// use std::path::Path;
///
/// let mesh = ObjLoader::load_from_file(Path::new("ground.obj"))?;
/// println!("加载了 {} 个面", mesh.face_count());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct ObjLoader;

impl ObjLoader {
    fn load_options() -> tobj::LoadOptions {
        tobj::LoadOptions {
            triangulate: false,
            single_index: false,
            ignore_points: true,
            ignore_lines: true,
            ..Default::default()
        }
    }

    /// 把 tobj 的模型列表合并成一个 `PolyMesh`
    fn build_mesh(models: &[tobj::Model], name: &str) -> Result<PolyMesh> {
        if models.is_empty() {
            return Err(MeshLoadError::InvalidGeometry("OBJ contains no objects".to_string()).into());
        }

        let mut positions: Vec<Point3> = Vec::new();
        let mut faces: Vec<Vec<u32>> = Vec::new();

        for model in models {
            let mesh = &model.mesh;

            if mesh.positions.len() % 3 != 0 {
                return Err(MeshLoadError::InvalidGeometry(format!(
                    "object '{}' has incomplete position data: {} floats",
                    model.name,
                    mesh.positions.len()
                ))
                .into());
            }

            let vertex_start = positions.len() as u32;
            positions.extend(mesh.positions.chunks_exact(3).map(|p| {
                Point3::new(p[0] as f64, p[1] as f64, p[2] as f64)
            }));

            // face_arities 为空表示所有面都是三角形
            let mut cursor = 0usize;
            let mut push_face = |arity: usize| -> Result<()> {
                let end = cursor + arity;
                let Some(indices) = mesh.indices.get(cursor..end) else {
                    return Err(MeshLoadError::ParseError(format!(
                        "object '{}' face indices end early at {}",
                        model.name, cursor
                    ))
                    .into());
                };
                faces.push(indices.iter().map(|&i| vertex_start + i).collect());
                cursor = end;
                Ok(())
            };

            if mesh.face_arities.is_empty() {
                for _ in 0..mesh.indices.len() / 3 {
                    push_face(3)?;
                }
            } else {
                for &arity in &mesh.face_arities {
                    push_face(arity as usize)?;
                }
            }

            tracing::debug!(
                object = %model.name,
                vertices = mesh.positions.len() / 3,
                "OBJ object parsed"
            );
        }

        // 空文件或只有点/线的文件，tobj 仍会返回一个没有面的模型
        if faces.is_empty() {
            return Err(MeshLoadError::InvalidGeometry("OBJ contains no faces".to_string()).into());
        }

        let mesh = PolyMesh::new(positions, faces)?.with_name(name);

        tracing::info!(
            "Loaded OBJ '{}': {} vertices, {} faces, {} objects",
            name,
            mesh.vertex_count(),
            crate::geometry::MeshQuery::face_count(&mesh),
            models.len()
        );

        Ok(mesh)
    }
}

impl MeshLoader for ObjLoader {
    fn load_from_file(path: &Path) -> Result<PolyMesh> {
        // 检查文件是否存在
        if !path.exists() {
            return Err(MeshLoadError::FileNotFound(path.to_path_buf()).into());
        }

        let (models, _materials) = tobj::load_obj(path, &Self::load_options())
            .map_err(|e| MeshLoadError::ParseError(format!("tobj: {}", e)))?;

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Unnamed");

        Self::build_mesh(&models, name)
    }

    fn load_from_memory(data: &[u8]) -> Result<PolyMesh> {
        let mut reader = BufReader::new(data);

        // 内存数据没有 mtllib 的相对路径可用，材质一律跳过
        let (models, _materials) = tobj::load_obj_buf(&mut reader, &Self::load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })
        .map_err(|e| MeshLoadError::ParseError(format!("tobj: {}", e)))?;

        Self::build_mesh(&models, "memory")
    }

    fn supported_extensions() -> &'static [&'static str] {
        &["obj"]
    }
}
