//! 软法线约束的计算入口
//!
//! 宿主在判断输入发生变化后调用 `SoftNormalConstraint::compute`。
//! 约束本身不保存任何状态，也不知道输出是否过期；每次调用都从零计算。
//! 计算失败时返回错误，宿主应保留上一次的输出。

use crate::core::config::{ConstraintConfig, DegeneratePolicy};
use crate::core::error::{Result, SoftNormalError};
use crate::geometry::{FaceIndex, MeshQuery};
use crate::math::{matrix, Matrix4, Point3, Quaternion, Vector3};

use super::orientation::resolve_orientation;
use super::region::collect_region;

/// 约束参数（构造时确定，进程内没有全局注册状态）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintSettings {
    /// 旋转前的“上”方向
    pub reference_axis: Vector3,

    /// 法线之和为零时的处理方式
    pub on_degenerate: DegeneratePolicy,
}

impl Default for ConstraintSettings {
    fn default() -> Self {
        Self {
            reference_axis: Vector3::y(),
            on_degenerate: DegeneratePolicy::Fail,
        }
    }
}

impl From<&ConstraintConfig> for ConstraintSettings {
    fn from(config: &ConstraintConfig) -> Self {
        Self {
            reference_axis: config.reference_axis(),
            on_degenerate: config.on_degenerate,
        }
    }
}

/// 一次计算的输入，由宿主按需提供
///
/// 任何一项为 `None` 都会直接返回 `MissingInput`，不会用默认值代替。
pub struct ConstraintInputs<'a, M: ?Sized> {
    /// 目标网格（世界空间）
    pub mesh: Option<&'a M>,

    /// 被约束对象的世界矩阵，只使用平移分量
    pub world_matrix: Option<Matrix4>,

    /// 收集半径
    pub radius: Option<f64>,
}

// 手写 Clone/Copy：派生会要求 M: Copy
impl<M: ?Sized> Clone for ConstraintInputs<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: ?Sized> Copy for ConstraintInputs<'_, M> {}

impl<'a, M: ?Sized> ConstraintInputs<'a, M> {
    /// 三项输入都齐全
    pub fn new(mesh: &'a M, world_matrix: Matrix4, radius: f64) -> Self {
        Self {
            mesh: Some(mesh),
            world_matrix: Some(world_matrix),
            radius: Some(radius),
        }
    }
}

/// 一次计算的输出
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintOutput {
    /// outRotateX（弧度）
    pub out_rotate_x: f64,

    /// outRotateY（弧度）
    pub out_rotate_y: f64,

    /// outRotateZ（弧度）
    pub out_rotate_z: f64,

    /// outPolyNumber：区域内的面数
    pub out_poly_number: usize,

    /// 求得的旋转
    pub rotation: Quaternion,

    /// 网格上离参考位置最近的点（区域收集的参考点）
    pub surface_point: Point3,

    /// 最近点所在的种子面
    pub seed_face: FaceIndex,

    /// 输出是否为退化回退值
    pub degenerate: bool,
}

/// 软法线约束
///
/// # 使用示例
///
/// ```rust
/// use soft_normal::constraint::{ConstraintInputs, SoftNormalConstraint};
/// use soft_normal::geometry::PolyMesh;
/// use soft_normal::math::{Matrix4, Vector3};
///
/// let mesh = PolyMesh::grid(4, 4, 1.0);
/// let constraint = SoftNormalConstraint::default();
/// let world = Matrix4::new_translation(&Vector3::new(0.2, 1.0, 0.3));
///
/// let output = constraint.compute(&ConstraintInputs::new(&mesh, world, 1.5))?;
/// assert_eq!(output.out_rotate_x, 0.0);
/// # Ok::<(), soft_normal::core::SoftNormalError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SoftNormalConstraint {
    settings: ConstraintSettings,
}

impl SoftNormalConstraint {
    pub fn new(settings: ConstraintSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ConstraintSettings {
        &self.settings
    }

    /// 立即计算一次
    ///
    /// 流程：世界矩阵平移 → 网格最近点与种子面 → 区域收集 → 朝向求解。
    pub fn compute<M>(&self, inputs: &ConstraintInputs<'_, M>) -> Result<ConstraintOutput>
    where
        M: MeshQuery + ?Sized,
    {
        let mesh = inputs.mesh.ok_or(SoftNormalError::MissingInput("mesh"))?;
        let world_matrix = inputs
            .world_matrix
            .as_ref()
            .ok_or(SoftNormalError::MissingInput("world matrix"))?;
        let radius = inputs.radius.ok_or(SoftNormalError::MissingInput("radius"))?;

        if mesh.face_count() == 0 {
            return Err(SoftNormalError::MissingInput("mesh has no faces"));
        }

        let position = matrix::translation_of(world_matrix);
        let closest = mesh.closest_point(&position)?;

        let region = collect_region(mesh, &closest.point, closest.face, radius)?;
        let orientation = resolve_orientation(region.normals(), &self.settings.reference_axis)?;

        if orientation.degenerate && self.settings.on_degenerate == DegeneratePolicy::Fail {
            return Err(SoftNormalError::DegenerateOrientation {
                face_count: orientation.face_count,
            });
        }

        crate::constraint_debug!(
            seed = closest.face,
            faces = orientation.face_count,
            direction = ?orientation.direction,
            "Soft normal resolved"
        );

        Ok(ConstraintOutput {
            out_rotate_x: orientation.euler.x,
            out_rotate_y: orientation.euler.y,
            out_rotate_z: orientation.euler.z,
            out_poly_number: orientation.face_count,
            rotation: orientation.rotation,
            surface_point: closest.point,
            seed_face: closest.face,
            degenerate: orientation.degenerate,
        })
    }
}
