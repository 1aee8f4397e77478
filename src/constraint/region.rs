//! 半径内面区域收集
//!
//! 从种子面出发，沿共享边做深度优先遍历。相邻面的中心到参考点的距离
//! 严格小于半径时才进入该面；否则该面被排除，且不会经由它继续扩展。
//!
//! 因此区域是“种子面 + 半径内的面”这个子图中包含种子面的连通分量：
//! 一个半径外的面会遮挡它后面的面，即使那些面本身在半径内，
//! 只要没有其他不经过半径外面的路径，它们就不会被收集。
//!
//! 遍历使用显式栈模拟递归，访问顺序与递归版本完全一致，
//! 但深度不受调用栈限制。

use std::collections::HashSet;

use crate::core::error::{Result, SoftNormalError};
use crate::geometry::{FaceIndex, MeshQuery};
use crate::math::{Point3, Point3Ext, Vector3};

/// 一次遍历收集到的面区域
///
/// `faces` 与 `normals` 按访问顺序一一对应，长度始终相等。
#[derive(Debug, Clone, Default)]
pub struct Region {
    faces: Vec<FaceIndex>,
    normals: Vec<Vector3>,
    visited: HashSet<FaceIndex>,
}

impl Region {
    /// 按深度优先访问顺序排列的面
    pub fn faces(&self) -> &[FaceIndex] {
        &self.faces
    }

    /// 与 `faces` 对齐的面法线
    pub fn normals(&self) -> &[Vector3] {
        &self.normals
    }

    /// 区域中的面数量
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn contains(&self, face: FaceIndex) -> bool {
        self.visited.contains(&face)
    }

    /// 收下一个面，已存在的面被忽略
    fn admit(&mut self, face: FaceIndex, normal: Vector3) {
        if self.visited.insert(face) {
            self.faces.push(face);
            self.normals.push(normal);
        }
    }
}

/// 遍历栈帧：某个已收下的面的邻接列表和下一个待检查的位置
struct Frame<'m> {
    neighbors: &'m [FaceIndex],
    cursor: usize,
}

/// 收集与 `seed_face` 拓扑连通、且中心在 `radius` 内的面
///
/// 种子面总会被收下，半径只约束相邻面的准入。
///
/// # 错误
///
/// - `InvalidRadius`：半径不是正的有限值
/// - `InvalidIndex`：种子面或网格报告的相邻面不存在
pub fn collect_region<M>(
    mesh: &M,
    reference: &Point3,
    seed_face: FaceIndex,
    radius: f64,
) -> Result<Region>
where
    M: MeshQuery + ?Sized,
{
    if !(radius > 0.0 && radius.is_finite()) {
        return Err(SoftNormalError::InvalidRadius(radius));
    }
    if !mesh.contains_face(seed_face) {
        return Err(SoftNormalError::InvalidIndex {
            face: seed_face,
            face_count: mesh.face_count(),
        });
    }

    let mut region = Region::default();
    region.admit(seed_face, mesh.face_normal(seed_face)?);

    let mut stack = vec![Frame {
        neighbors: mesh.connected_faces(seed_face)?,
        cursor: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let Some(&neighbor) = frame.neighbors.get(frame.cursor) else {
            stack.pop();
            continue;
        };
        frame.cursor += 1;

        if region.contains(neighbor) {
            continue;
        }

        let center = mesh.face_center(neighbor)?;
        let distance = reference.distance_to(&center);
        if distance < radius {
            region.admit(neighbor, mesh.face_normal(neighbor)?);
            stack.push(Frame {
                neighbors: mesh.connected_faces(neighbor)?,
                cursor: 0,
            });
        } else {
            tracing::trace!(face = neighbor, distance, radius, "Face outside radius");
        }
    }

    crate::constraint_debug!(
        seed = seed_face,
        radius,
        faces = region.len(),
        "Region collected"
    );

    Ok(region)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{ClosestPoint, PolyMesh};

    /// 手工构造的网格：直接给出法线、中心和邻接，方便构造边界情况
    struct GraphMesh {
        normals: Vec<Vector3>,
        centers: Vec<Point3>,
        adjacency: Vec<Vec<FaceIndex>>,
    }

    impl MeshQuery for GraphMesh {
        fn face_count(&self) -> usize {
            self.normals.len()
        }

        fn face_normal(&self, face: FaceIndex) -> Result<Vector3> {
            self.normals.get(face as usize).copied().ok_or(SoftNormalError::InvalidIndex {
                face,
                face_count: self.normals.len(),
            })
        }

        fn face_center(&self, face: FaceIndex) -> Result<Point3> {
            self.centers.get(face as usize).copied().ok_or(SoftNormalError::InvalidIndex {
                face,
                face_count: self.centers.len(),
            })
        }

        fn connected_faces(&self, face: FaceIndex) -> Result<&[FaceIndex]> {
            self.adjacency
                .get(face as usize)
                .map(Vec::as_slice)
                .ok_or(SoftNormalError::InvalidIndex {
                    face,
                    face_count: self.adjacency.len(),
                })
        }

        fn closest_point(&self, _position: &Point3) -> Result<ClosestPoint> {
            Err(SoftNormalError::MissingInput("closest point"))
        }
    }

    /// 沿 x 轴排成一列的面，中心在 (x, 0, 0)，相邻面互相连接
    fn line_mesh(xs: &[f64]) -> GraphMesh {
        let n = xs.len();
        GraphMesh {
            normals: vec![Vector3::y(); n],
            centers: xs.iter().map(|&x| Point3::new(x, 0.0, 0.0)).collect(),
            adjacency: (0..n)
                .map(|i| {
                    let mut adj = Vec::new();
                    if i > 0 {
                        adj.push(i as FaceIndex - 1);
                    }
                    if i + 1 < n {
                        adj.push(i as FaceIndex + 1);
                    }
                    adj
                })
                .collect(),
        }
    }

    #[test]
    fn test_seed_always_included() {
        let mesh = PolyMesh::grid(3, 3, 1.0);
        // 参考点离所有面都很远
        let reference = Point3::new(100.0, 0.0, 100.0);
        let region = collect_region(&mesh, &reference, 4, 0.5).unwrap();

        assert_eq!(region.faces(), &[4]);
        assert_eq!(region.normals().len(), 1);
    }

    #[test]
    fn test_large_radius_collects_whole_grid() {
        let mesh = PolyMesh::grid(4, 4, 1.0);
        let region = collect_region(&mesh, &Point3::origin(), 5, 100.0).unwrap();

        assert_eq!(region.len(), 16);
        assert_eq!(region.faces().len(), region.normals().len());

        let unique: HashSet<_> = region.faces().iter().copied().collect();
        assert_eq!(unique.len(), 16);
    }

    #[test]
    fn test_radius_limits_region_on_grid() {
        let mesh = PolyMesh::grid(5, 5, 1.0);
        // 中心面 12，四个直接邻居中心距离 1.0，对角面距离 √2
        let region = collect_region(&mesh, &Point3::origin(), 12, 1.2).unwrap();

        let mut faces = region.faces().to_vec();
        faces.sort_unstable();
        assert_eq!(faces, vec![7, 11, 12, 13, 17]);
    }

    #[test]
    fn test_exact_boundary_distance_is_rejected() {
        let mesh = line_mesh(&[0.0, 1.0, 2.0]);
        let region = collect_region(&mesh, &Point3::origin(), 0, 1.0).unwrap();
        assert_eq!(region.faces(), &[0]);

        let region = collect_region(&mesh, &Point3::origin(), 0, 1.0 + 1e-9).unwrap();
        assert_eq!(region.faces(), &[0, 1]);
    }

    #[test]
    fn test_out_of_radius_face_shadows_faces_behind_it() {
        // 面 1 在半径外，面 2 在半径内但只能经过面 1 到达
        let mesh = line_mesh(&[0.0, 5.0, 0.5]);
        let region = collect_region(&mesh, &Point3::origin(), 0, 1.0).unwrap();

        assert_eq!(region.faces(), &[0]);
        assert!(!region.contains(2));
    }

    #[test]
    fn test_alternate_path_around_blocking_face() {
        // 0 - 1(远) - 2，同时 0 - 3 - 2
        let mesh = GraphMesh {
            normals: vec![Vector3::y(); 4],
            centers: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(9.0, 0.0, 0.0),
                Point3::new(0.5, 0.0, 0.0),
                Point3::new(0.0, 0.0, 0.5),
            ],
            adjacency: vec![vec![1, 3], vec![0, 2], vec![1, 3], vec![0, 2]],
        };
        let region = collect_region(&mesh, &Point3::origin(), 0, 1.0).unwrap();

        assert_eq!(region.faces(), &[0, 3, 2]);
    }

    #[test]
    fn test_depth_first_visit_order() {
        // 0 的邻居按顺序是 1、2；1 的邻居 3 在 2 之前被访问
        let mesh = GraphMesh {
            normals: vec![Vector3::y(); 4],
            centers: vec![Point3::origin(); 4],
            adjacency: vec![vec![1, 2], vec![0, 3], vec![0], vec![1]],
        };
        let region = collect_region(&mesh, &Point3::origin(), 0, 1.0).unwrap();

        assert_eq!(region.faces(), &[0, 1, 3, 2]);
    }

    #[test]
    fn test_cycle_visits_each_face_once() {
        let mesh = GraphMesh {
            normals: vec![Vector3::y(); 3],
            centers: vec![Point3::origin(); 3],
            adjacency: vec![vec![1, 2], vec![2, 0], vec![0, 1]],
        };
        let region = collect_region(&mesh, &Point3::origin(), 1, 1.0).unwrap();

        assert_eq!(region.faces(), &[1, 2, 0]);
        assert_eq!(region.normals().len(), 3);
    }

    #[test]
    fn test_first_ring_grows_with_radius() {
        let mesh = PolyMesh::grid(5, 5, 1.0);
        let reference = Point3::new(0.2, 0.0, 0.1);
        let first_ring: Vec<FaceIndex> = mesh.connected_faces(12).unwrap().to_vec();

        let mut previous = 0;
        for radius in [0.5, 0.9, 1.0, 1.1, 1.3, 2.0] {
            let region = collect_region(&mesh, &reference, 12, radius).unwrap();
            let admitted = first_ring.iter().filter(|&&f| region.contains(f)).count();
            assert!(admitted >= previous);
            previous = admitted;
        }
        assert_eq!(previous, first_ring.len());
    }

    #[test]
    fn test_long_strip_does_not_recurse() {
        let xs: Vec<f64> = (0..200_000).map(|i| i as f64 * 1e-6).collect();
        let mesh = line_mesh(&xs);
        let region = collect_region(&mesh, &Point3::origin(), 0, 1.0).unwrap();

        assert_eq!(region.len(), xs.len());
    }

    #[test]
    fn test_invalid_seed() {
        let mesh = PolyMesh::grid(2, 2, 1.0);
        let result = collect_region(&mesh, &Point3::origin(), 4, 1.0);

        assert!(matches!(
            result,
            Err(SoftNormalError::InvalidIndex { face: 4, face_count: 4 })
        ));
    }

    #[test]
    fn test_invalid_neighbor_fails_fast() {
        let mesh = GraphMesh {
            normals: vec![Vector3::y(); 2],
            centers: vec![Point3::origin(); 2],
            adjacency: vec![vec![1, 7], vec![0]],
        };
        let result = collect_region(&mesh, &Point3::origin(), 0, 1.0);

        assert!(matches!(result, Err(SoftNormalError::InvalidIndex { face: 7, .. })));
    }

    #[test]
    fn test_invalid_radius() {
        let mesh = PolyMesh::grid(1, 1, 1.0);
        for radius in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                collect_region(&mesh, &Point3::origin(), 0, radius),
                Err(SoftNormalError::InvalidRadius(_))
            ));
        }
    }

    #[test]
    fn test_tiny_radius_is_accepted() {
        let mesh = PolyMesh::grid(3, 1, 1.0);
        let region = collect_region(&mesh, &Point3::origin(), 1, 0.01).unwrap();
        assert_eq!(region.faces(), &[1]);
    }
}
