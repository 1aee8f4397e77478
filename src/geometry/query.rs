/// 网格查询接口
///
/// 核心算法只通过这个 trait 访问网格：拓扑邻接、面法线、面中心、最近点。
/// 实现方负责保证一次计算期间的所有查询看到同一份拓扑和几何快照。
use super::FaceIndex;
use crate::core::error::Result;
use crate::math::{Point3, Vector3};

/// 网格上的最近点查询结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPoint {
    /// 网格表面上的最近点
    pub point: Point3,

    /// 最近点所在的面
    pub face: FaceIndex,

    /// 查询点到最近点的距离
    pub distance: f64,
}

/// 只读网格查询 trait
///
/// # 实现要求
///
/// - 所有方法都是只读的，不允许修改拓扑
/// - 越界的面索引必须返回 `SoftNormalError::InvalidIndex`，不能静默跳过
/// - `connected_faces` 返回与该面共享至少一条边的面，不包含自身，不重复
pub trait MeshQuery {
    /// 面的数量
    fn face_count(&self) -> usize;

    /// 面的单位法线（退化面为零向量）
    fn face_normal(&self, face: FaceIndex) -> Result<Vector3>;

    /// 面的几何中心
    fn face_center(&self, face: FaceIndex) -> Result<Point3>;

    /// 与该面共享边的相邻面
    fn connected_faces(&self, face: FaceIndex) -> Result<&[FaceIndex]>;

    /// 网格表面上距离 `position` 最近的点及其所在面
    ///
    /// 网格没有面时返回 `SoftNormalError::MissingInput`。
    fn closest_point(&self, position: &Point3) -> Result<ClosestPoint>;

    /// 检查面索引是否有效
    fn contains_face(&self, face: FaceIndex) -> bool {
        (face as usize) < self.face_count()
    }
}
