//! 多表面最近点
//!
//! 在若干个带世界矩阵的网格上查找离给定位置最近的点。
//! 每个网格在自己的局部空间中查询，结果再变换回世界空间比较距离。

use crate::core::error::{Result, SoftNormalError};
use crate::geometry::{FaceIndex, MeshQuery};
use crate::math::{matrix, Matrix4, Point3, Point3Ext};

/// 多表面查询结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// 世界空间中的最近点
    pub point: Point3,

    /// 命中的表面在输入列表中的下标
    pub surface: usize,

    /// 命中表面上的面索引
    pub face: FaceIndex,

    /// 世界空间距离
    pub distance: f64,
}

/// 在所有表面中查找离 `position` 最近的点
///
/// 距离相等时保留先出现的表面。
///
/// # 错误
///
/// - `MissingInput`：没有任何表面
/// - `SingularTransform`：某个世界矩阵不可逆
pub fn closest_point_on_surfaces<M>(surfaces: &[(&M, Matrix4)], position: &Point3) -> Result<SurfaceHit>
where
    M: MeshQuery + ?Sized,
{
    let mut best: Option<SurfaceHit> = None;

    for (index, (mesh, world_matrix)) in surfaces.iter().enumerate() {
        let inverse = world_matrix
            .try_inverse()
            .ok_or(SoftNormalError::SingularTransform)?;

        let local_position = matrix::transform_point(&inverse, position);
        let local_hit = mesh.closest_point(&local_position)?;
        let world_point = matrix::transform_point(world_matrix, &local_hit.point);
        let distance = world_point.distance_to(position);

        if best.map_or(true, |hit| distance < hit.distance) {
            best = Some(SurfaceHit {
                point: world_point,
                surface: index,
                face: local_hit.face,
                distance,
            });
        }
    }

    best.ok_or(SoftNormalError::MissingInput("surfaces"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PolyMesh;
    use crate::math::utils::approx_eq;
    use crate::math::Vector3;

    fn lifted(y: f64) -> Matrix4 {
        Matrix4::new_translation(&Vector3::new(0.0, y, 0.0))
    }

    #[test]
    fn test_single_surface_with_offset() {
        let plane = PolyMesh::grid(2, 2, 1.0);
        let surfaces = [(&plane, lifted(2.0))];

        let hit = closest_point_on_surfaces(&surfaces, &Point3::new(0.2, 5.0, -0.3)).unwrap();

        assert_eq!(hit.surface, 0);
        assert!(approx_eq(hit.point.x, 0.2, 1e-12));
        assert!(approx_eq(hit.point.y, 2.0, 1e-12));
        assert!(approx_eq(hit.point.z, -0.3, 1e-12));
        assert!(approx_eq(hit.distance, 3.0, 1e-12));
    }

    #[test]
    fn test_nearest_surface_wins() {
        let plane = PolyMesh::grid(2, 2, 1.0);
        let surfaces = [(&plane, lifted(-4.0)), (&plane, lifted(1.0)), (&plane, lifted(5.0))];

        let hit = closest_point_on_surfaces(&surfaces, &Point3::new(0.0, 2.0, 0.0)).unwrap();

        assert_eq!(hit.surface, 1);
        assert!(approx_eq(hit.distance, 1.0, 1e-12));
    }

    #[test]
    fn test_tie_keeps_first_surface() {
        let plane = PolyMesh::grid(2, 2, 1.0);
        let surfaces = [(&plane, lifted(-1.0)), (&plane, lifted(1.0))];

        let hit = closest_point_on_surfaces(&surfaces, &Point3::origin()).unwrap();

        assert_eq!(hit.surface, 0);
    }

    #[test]
    fn test_scaled_surface_distance_is_in_world_space() {
        let plane = PolyMesh::grid(2, 2, 1.0);
        // 放大 10 倍后平面覆盖 [-10, 10]，局部坐标中的点离平面 0.3，世界空间中离 3
        let world = Matrix4::new_nonuniform_scaling(&Vector3::new(10.0, 10.0, 10.0));
        let surfaces = [(&plane, world)];

        let hit = closest_point_on_surfaces(&surfaces, &Point3::new(4.0, 3.0, 0.0)).unwrap();

        assert!(approx_eq(hit.point.x, 4.0, 1e-9));
        assert!(approx_eq(hit.point.y, 0.0, 1e-9));
        assert!(approx_eq(hit.distance, 3.0, 1e-9));
    }

    #[test]
    fn test_no_surfaces() {
        let surfaces: [(&PolyMesh, Matrix4); 0] = [];
        assert!(matches!(
            closest_point_on_surfaces(&surfaces, &Point3::origin()),
            Err(SoftNormalError::MissingInput(_))
        ));
    }

    #[test]
    fn test_singular_matrix() {
        let plane = PolyMesh::grid(1, 1, 1.0);
        let surfaces = [(&plane, Matrix4::zeros())];
        assert!(matches!(
            closest_point_on_surfaces(&surfaces, &Point3::origin()),
            Err(SoftNormalError::SingularTransform)
        ));
    }
}
