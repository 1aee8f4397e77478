/// 多边形网格数据结构模块
///
/// 定义CPU侧的多边形网格容器，面可以是任意边数（≥3）。
/// 构建时一次性计算面法线、面中心和面邻接，之后所有查询都是只读的。

use super::query::{ClosestPoint, MeshQuery};
use super::topology::build_face_adjacency;
use super::FaceIndex;
use crate::core::error::{MeshLoadError, Result, SoftNormalError};
use crate::math::geometry::{closest_point_on_triangle, polygon_center, polygon_normal};
use crate::math::{matrix, Matrix4, Point3, Point3Ext, Vector3};

/// 多边形网格
///
/// 以索引引用面和顶点（arena + index），不持有任何指针。
///
/// # 示例
///
/// ```rust
/// use soft_normal::geometry::{MeshQuery, PolyMesh};
/// use soft_normal::math::Point3;
///
/// let mesh = PolyMesh::new(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(0.0, 0.0, 1.0),
///         Point3::new(1.0, 0.0, 1.0),
///         Point3::new(1.0, 0.0, 0.0),
///     ],
///     vec![vec![0, 1, 2, 3]],
/// )?;
/// assert_eq!(mesh.face_count(), 1);
/// # Ok::<(), soft_normal::core::SoftNormalError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PolyMesh {
    /// 顶点位置
    positions: Vec<Point3>,

    /// 面的顶点索引列表
    faces: Vec<Vec<u32>>,

    /// 面法线缓存
    normals: Vec<Vector3>,

    /// 面中心缓存
    centers: Vec<Point3>,

    /// 面邻接缓存
    adjacency: Vec<Vec<FaceIndex>>,

    /// 网格名称（可选）
    ///
    /// 从文件中读取的网格名称，用于日志和识别。
    pub name: Option<String>,
}

impl PolyMesh {
    /// 从顶点位置和面索引创建网格
    ///
    /// # 错误
    ///
    /// - 面的顶点数少于 3
    /// - 顶点索引超出范围
    pub fn new(positions: Vec<Point3>, faces: Vec<Vec<u32>>) -> Result<Self> {
        validate_faces(positions.len(), &faces)?;

        let adjacency = build_face_adjacency(&faces);
        let mut mesh = Self {
            positions,
            faces,
            normals: Vec::new(),
            centers: Vec::new(),
            adjacency,
            name: None,
        };
        mesh.update_face_cache();
        Ok(mesh)
    }

    /// 设置网格名称
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// 创建位于 XZ 平面 (y = 0) 的规则四边形网格，法线朝 +Y，以原点为中心
    ///
    /// 面按行优先编号：`face = row * columns + column`。
    pub fn grid(columns: usize, rows: usize, cell_size: f64) -> Self {
        let half_x = columns as f64 * cell_size * 0.5;
        let half_z = rows as f64 * cell_size * 0.5;
        let stride = (rows + 1) as u32;

        let mut positions = Vec::with_capacity((columns + 1) * (rows + 1));
        for i in 0..=columns {
            for j in 0..=rows {
                positions.push(Point3::new(
                    i as f64 * cell_size - half_x,
                    0.0,
                    j as f64 * cell_size - half_z,
                ));
            }
        }

        let mut faces = Vec::with_capacity(columns * rows);
        for j in 0..rows as u32 {
            for i in 0..columns as u32 {
                let v = |x: u32, z: u32| x * stride + z;
                faces.push(vec![v(i, j), v(i, j + 1), v(i + 1, j + 1), v(i + 1, j)]);
            }
        }

        let adjacency = build_face_adjacency(&faces);
        let mut mesh = Self {
            positions,
            faces,
            normals: Vec::new(),
            centers: Vec::new(),
            adjacency,
            name: Some("grid".to_string()),
        };
        mesh.update_face_cache();
        mesh
    }

    /// 获取顶点数量
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// 顶点位置
    #[inline]
    pub fn positions(&self) -> &[Point3] {
        &self.positions
    }

    /// 面的顶点索引
    pub fn face_vertices(&self, face: FaceIndex) -> Result<&[u32]> {
        self.faces
            .get(face as usize)
            .map(Vec::as_slice)
            .ok_or_else(|| self.invalid_index(face))
    }

    /// 返回用 `matrix` 变换到新空间后的网格副本
    ///
    /// 拓扑不变，法线和中心重新计算。非均匀缩放下法线保持正确；
    /// 行列式为负（镜像）时翻转每个面的环绕方向，使法线与逆转置变换一致。
    pub fn transformed(&self, matrix: &Matrix4) -> Self {
        let mut mesh = self.clone();
        for p in mesh.positions.iter_mut() {
            *p = matrix::transform_point(matrix, p);
        }

        if matrix.fixed_view::<3, 3>(0, 0).determinant() < 0.0 {
            // 保留首顶点，扇形三角化的起点不变
            for face in mesh.faces.iter_mut() {
                face[1..].reverse();
            }
        }

        mesh.update_face_cache();
        mesh
    }

    /// 重新计算面法线和面中心
    fn update_face_cache(&mut self) {
        let mut normals = Vec::with_capacity(self.faces.len());
        let mut centers = Vec::with_capacity(self.faces.len());
        let mut points: Vec<Point3> = Vec::new();

        for face in &self.faces {
            points.clear();
            points.extend(face.iter().map(|&v| self.positions[v as usize]));
            normals.push(polygon_normal(&points));
            centers.push(polygon_center(&points));
        }

        self.normals = normals;
        self.centers = centers;
    }

    fn invalid_index(&self, face: FaceIndex) -> SoftNormalError {
        SoftNormalError::InvalidIndex {
            face,
            face_count: self.faces.len(),
        }
    }
}

impl MeshQuery for PolyMesh {
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn face_normal(&self, face: FaceIndex) -> Result<Vector3> {
        self.normals
            .get(face as usize)
            .copied()
            .ok_or_else(|| self.invalid_index(face))
    }

    fn face_center(&self, face: FaceIndex) -> Result<Point3> {
        self.centers
            .get(face as usize)
            .copied()
            .ok_or_else(|| self.invalid_index(face))
    }

    fn connected_faces(&self, face: FaceIndex) -> Result<&[FaceIndex]> {
        self.adjacency
            .get(face as usize)
            .map(Vec::as_slice)
            .ok_or_else(|| self.invalid_index(face))
    }

    /// 暴力遍历所有面（扇形三角化），距离相同时保留索引较小的面
    fn closest_point(&self, position: &Point3) -> Result<ClosestPoint> {
        let mut best: Option<(Point3, FaceIndex, f64)> = None;

        for (face_index, face) in self.faces.iter().enumerate() {
            let a = &self.positions[face[0] as usize];
            for pair in face[1..].windows(2) {
                let b = &self.positions[pair[0] as usize];
                let c = &self.positions[pair[1] as usize];
                let candidate = closest_point_on_triangle(position, a, b, c);
                let dist_sq = candidate.distance_squared_to(position);

                if best.map_or(true, |(_, _, d)| dist_sq < d) {
                    best = Some((candidate, face_index as FaceIndex, dist_sq));
                }
            }
        }

        best.map(|(point, face, dist_sq)| ClosestPoint {
            point,
            face,
            distance: dist_sq.sqrt(),
        })
        .ok_or(SoftNormalError::MissingInput("mesh has no faces"))
    }
}

/// 验证面索引的有效性
///
/// 检查：
/// - 每个面至少 3 个顶点
/// - 所有索引都在有效范围内
fn validate_faces(vertex_count: usize, faces: &[Vec<u32>]) -> Result<()> {
    for (i, face) in faces.iter().enumerate() {
        if face.len() < 3 {
            return Err(MeshLoadError::InvalidGeometry(format!(
                "face {} has {} vertices, at least 3 required",
                i,
                face.len()
            ))
            .into());
        }

        if let Some(&index) = face.iter().find(|&&v| v as usize >= vertex_count) {
            return Err(MeshLoadError::InvalidGeometry(format!(
                "face {} references vertex {} (mesh has {} vertices)",
                i, index, vertex_count
            ))
            .into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::utils::{approx_eq, approx_eq_vec3};

    #[test]
    fn test_grid_counts_and_normals() {
        let mesh = PolyMesh::grid(3, 2, 1.0);

        assert_eq!(mesh.face_count(), 6);
        assert_eq!(mesh.vertex_count(), 12);
        for face in 0..mesh.face_count() as FaceIndex {
            let n = mesh.face_normal(face).unwrap();
            assert!(approx_eq_vec3(&n, &Vector3::y(), 1e-12));
        }
    }

    #[test]
    fn test_grid_centers_and_adjacency() {
        let mesh = PolyMesh::grid(3, 3, 1.0);

        // 中心面
        let c = mesh.face_center(4).unwrap();
        assert!(approx_eq_vec3(&c.coords, &Vector3::zeros(), 1e-12));

        let mut neighbors = mesh.connected_faces(4).unwrap().to_vec();
        neighbors.sort_unstable();
        assert_eq!(neighbors, vec![1, 3, 5, 7]);

        let mut corner = mesh.connected_faces(0).unwrap().to_vec();
        corner.sort_unstable();
        assert_eq!(corner, vec![1, 3]);
    }

    #[test]
    fn test_invalid_face_index() {
        let mesh = PolyMesh::grid(1, 1, 1.0);

        assert!(matches!(
            mesh.face_normal(1),
            Err(SoftNormalError::InvalidIndex { face: 1, face_count: 1 })
        ));
        assert!(mesh.face_center(5).is_err());
        assert!(mesh.connected_faces(9).is_err());
        assert!(mesh.face_vertices(2).is_err());
        assert!(!mesh.contains_face(1));
    }

    #[test]
    fn test_new_rejects_bad_faces() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];

        assert!(PolyMesh::new(positions.clone(), vec![vec![0, 1]]).is_err());
        assert!(PolyMesh::new(positions.clone(), vec![vec![0, 1, 3]]).is_err());
        assert!(PolyMesh::new(positions, vec![vec![0, 1, 2]]).is_ok());
    }

    #[test]
    fn test_closest_point_picks_face_under_position() {
        let mesh = PolyMesh::grid(3, 3, 1.0);
        let hit = mesh.closest_point(&Point3::new(1.2, 5.0, -1.1)).unwrap();

        // x ∈ [0.5, 1.5] 是第 2 列，z ∈ [-1.5, -0.5] 是第 0 行
        assert_eq!(hit.face, 2);
        assert!(approx_eq_vec3(&hit.point.coords, &Vector3::new(1.2, 0.0, -1.1), 1e-12));
        assert!(approx_eq(hit.distance, 5.0, 1e-12));
    }

    #[test]
    fn test_closest_point_empty_mesh() {
        let mesh = PolyMesh::new(Vec::new(), Vec::new()).unwrap();
        assert!(matches!(
            mesh.closest_point(&Point3::origin()),
            Err(SoftNormalError::MissingInput(_))
        ));
    }

    #[test]
    fn test_transformed_recomputes_normals() {
        let mesh = PolyMesh::grid(1, 1, 1.0);
        let rotation = matrix::compose(
            &Vector3::new(0.0, 2.0, 0.0),
            &Vector3::new(0.0, 0.0, -crate::math::constants::PI / 2.0),
            &Vector3::new(1.0, 1.0, 1.0),
        );
        let moved = mesh.transformed(&rotation);

        // 绕 Z 轴 -90°：+Y 法线转到 +X
        let n = moved.face_normal(0).unwrap();
        assert!(approx_eq_vec3(&n, &Vector3::x(), 1e-12));
        let c = moved.face_center(0).unwrap();
        assert!(approx_eq_vec3(&c.coords, &Vector3::new(0.0, 2.0, 0.0), 1e-12));
    }

    #[test]
    fn test_mirrored_transform_flips_normals() {
        let mesh = PolyMesh::grid(2, 1, 1.0);
        let mirror = Matrix4::new_nonuniform_scaling(&Vector3::new(1.0, -1.0, 1.0));
        let mirrored = mesh.transformed(&mirror);

        for face in 0..mirrored.face_count() as FaceIndex {
            let n = mirrored.face_normal(face).unwrap();
            assert!(approx_eq_vec3(&n, &-Vector3::y(), 1e-12));
        }
        // 拓扑和首顶点不变
        assert_eq!(mirrored.connected_faces(0).unwrap(), mesh.connected_faces(0).unwrap());
        assert_eq!(mirrored.face_vertices(1).unwrap()[0], mesh.face_vertices(1).unwrap()[0]);
    }

    #[test]
    fn test_mirror_across_x_keeps_plane_normal() {
        // 平面内的镜像：y = 0 平面的法线仍然是 +Y
        let mesh = PolyMesh::grid(1, 1, 1.0);
        let mirror = Matrix4::new_nonuniform_scaling(&Vector3::new(-1.0, 1.0, 1.0));
        let n = mesh.transformed(&mirror).face_normal(0).unwrap();
        assert!(approx_eq_vec3(&n, &Vector3::y(), 1e-12));
    }
}
