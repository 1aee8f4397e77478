//! 朝向求解
//!
//! 把区域内的法线归约为一个代表方向（逐分量求和后归一化），
//! 再求从固定参考轴到该方向的最短弧旋转，并分解为 XYZ 欧拉角。
//!
//! 最短弧旋转不绕目标方向自转，所以输出只约束“朝向”，不约束扭转。

use crate::core::error::{Result, SoftNormalError};
use crate::math::{constants, quaternion, utils, Quaternion, Vector3};

/// 法线之和的长度低于该值即视为退化
pub const DEGENERATE_EPSILON: f64 = 1e-9;

/// XYZ 顺序的欧拉角（弧度）
///
/// 先绕 X，再绕 Y，最后绕 Z。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EulerRotation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl EulerRotation {
    /// 从四元数分解
    pub fn from_quaternion(quat: &Quaternion) -> Self {
        let (x, y, z) = quaternion::to_euler_xyz(quat);
        Self { x, y, z }
    }

    /// 转换为度数
    pub fn to_degrees(&self) -> [f64; 3] {
        [
            utils::rad_to_deg(self.x),
            utils::rad_to_deg(self.y),
            utils::rad_to_deg(self.z),
        ]
    }
}

/// 一次求解的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    /// 从参考轴到代表方向的最短弧旋转
    pub rotation: Quaternion,

    /// `rotation` 的欧拉角分解
    pub euler: EulerRotation,

    /// 代表方向（单位向量）；退化时等于参考轴
    pub direction: Vector3,

    /// 参与求和的法线数量
    pub face_count: usize,

    /// 法线之和为零，结果是回退值
    pub degenerate: bool,
}

/// 法线求和并归一化；和为零向量时返回 `None`
pub fn representative_direction(normals: &[Vector3]) -> Option<Vector3> {
    let sum = normals.iter().fold(Vector3::zeros(), |acc, n| acc + n);
    sum.try_normalize(DEGENERATE_EPSILON)
}

/// 求解区域法线对应的朝向
///
/// 法线完全抵消时不会产生 NaN：回退为参考轴（单位旋转），并设置 `degenerate`。
/// 是否把这种回退当作失败由调用方决定。
///
/// # 错误
///
/// - `EmptyRegion`：法线列表为空
/// - `MissingInput`：参考轴为零向量
pub fn resolve_orientation(normals: &[Vector3], reference_axis: &Vector3) -> Result<Orientation> {
    if normals.is_empty() {
        return Err(SoftNormalError::EmptyRegion);
    }

    let axis = reference_axis
        .try_normalize(constants::EPSILON)
        .ok_or(SoftNormalError::MissingInput("reference axis"))?;

    let (direction, rotation, degenerate) = match representative_direction(normals) {
        Some(direction) => {
            // axis 和 direction 都是单位向量，shortest_arc 只在零向量时返回 None
            let rotation = quaternion::shortest_arc(&axis, &direction)
                .unwrap_or_else(Quaternion::identity);
            (direction, rotation, false)
        }
        None => {
            crate::constraint_warn!(
                faces = normals.len(),
                "Normals cancel out, falling back to reference axis"
            );
            (axis, Quaternion::identity(), true)
        }
    };

    Ok(Orientation {
        rotation,
        euler: EulerRotation::from_quaternion(&rotation),
        direction,
        face_count: normals.len(),
        degenerate,
    })
}
