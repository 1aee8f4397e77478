//! 统一的数学库模块
//!
//! 提供约束求解所需的数学类型和函数。
//! 基于 `nalgebra`，全部使用 f64 精度（与 DCC 宿主的双精度网格数据保持一致）。
//!
//! # 模块组织
//!
//! - **基础类型**：Vector3, Point3, Matrix4, Quaternion
//! - **常量**：PI, DEG_TO_RAD, EPSILON 等
//! - **工具函数**：approx_eq, deg_to_rad 等
//! - **矩阵辅助函数**：提取平移、变换点
//! - **四元数辅助函数**：最短弧旋转、XYZ 欧拉角分解
//! - **几何处理**：多边形法线、中心点、最近点（见 geometry 子模块）

pub use nalgebra::{
    Matrix4 as Mat4, Point3 as Pt3, Unit, UnitQuaternion, Vector3 as Vec3,
};

// 类型别名，使用更简洁的名称
pub type Vector3 = Vec3<f64>;
pub type Point3 = Pt3<f64>;
pub type Matrix4 = Mat4<f64>;
pub type Quaternion = UnitQuaternion<f64>;

/// 数学常量
pub mod constants {
    /// π
    pub const PI: f64 = std::f64::consts::PI;

    /// 角度转弧度的系数
    pub const DEG_TO_RAD: f64 = PI / 180.0;

    /// 弧度转角度的系数
    pub const RAD_TO_DEG: f64 = 180.0 / PI;

    /// 浮点数比较的 epsilon
    pub const EPSILON: f64 = 1e-9;
}

/// 数学工具函数
pub mod utils {
    use super::*;

    /// 角度转弧度
    pub fn deg_to_rad(degrees: f64) -> f64 {
        degrees * constants::DEG_TO_RAD
    }

    /// 弧度转角度
    pub fn rad_to_deg(radians: f64) -> f64 {
        radians * constants::RAD_TO_DEG
    }

    /// 检查两个浮点数是否近似相等
    pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    /// 检查两个向量是否逐分量近似相等
    pub fn approx_eq_vec3(a: &Vector3, b: &Vector3, epsilon: f64) -> bool {
        approx_eq(a.x, b.x, epsilon) && approx_eq(a.y, b.y, epsilon) && approx_eq(a.z, b.z, epsilon)
    }
}

/// 点/向量扩展 trait
///
/// 为 nalgebra 的点类型添加额外的便捷方法
pub trait Point3Ext {
    /// 计算到另一个点的欧氏距离
    fn distance_to(&self, other: &Point3) -> f64;

    /// 计算到另一个点的距离平方
    fn distance_squared_to(&self, other: &Point3) -> f64;
}

impl Point3Ext for Point3 {
    fn distance_to(&self, other: &Point3) -> f64 {
        (self - other).norm()
    }

    fn distance_squared_to(&self, other: &Point3) -> f64 {
        (self - other).norm_squared()
    }
}

/// 矩阵辅助函数
pub mod matrix {
    use super::*;

    /// 提取仿射矩阵的平移分量（列主序，第 3 列）
    pub fn translation_of(matrix: &Matrix4) -> Point3 {
        Point3::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)])
    }

    /// 用仿射矩阵变换一个点
    pub fn transform_point(matrix: &Matrix4, point: &Point3) -> Point3 {
        matrix.transform_point(point)
    }

    /// 由平移、XYZ 欧拉角（弧度）和缩放组合 T * R * S 矩阵
    pub fn compose(translation: &Vector3, euler_xyz: &Vector3, scale: &Vector3) -> Matrix4 {
        let rotation = quaternion::from_euler_xyz(euler_xyz.x, euler_xyz.y, euler_xyz.z);
        Matrix4::new_translation(translation)
            * rotation.to_homogeneous()
            * Matrix4::new_nonuniform_scaling(scale)
    }
}

/// 四元数辅助函数
pub mod quaternion {
    use super::*;

    /// 从 XYZ 顺序的欧拉角创建四元数
    ///
    /// 先绕 X，再绕 Y，最后绕 Z（`R = Rz * Ry * Rx`）。
    pub fn from_euler_xyz(x: f64, y: f64, z: f64) -> Quaternion {
        UnitQuaternion::from_euler_angles(x, y, z)
    }

    /// 将四元数分解为 XYZ 顺序的欧拉角 (x, y, z)，单位弧度
    pub fn to_euler_xyz(quat: &Quaternion) -> (f64, f64, f64) {
        // nalgebra 的 (roll, pitch, yaw) 正好对应 R = Rz(yaw) * Ry(pitch) * Rx(roll)
        quat.euler_angles()
    }

    /// 计算把 `from` 旋转到 `to` 的最短弧四元数
    ///
    /// 两个向量反向时旋转轴不唯一，此时绕一个与 `from` 垂直的确定轴旋转 180°。
    /// 任一向量为零向量时返回 `None`。
    pub fn shortest_arc(from: &Vector3, to: &Vector3) -> Option<Quaternion> {
        let from = from.try_normalize(constants::EPSILON)?;
        let to = to.try_normalize(constants::EPSILON)?;

        if let Some(quat) = UnitQuaternion::rotation_between(&from, &to) {
            return Some(quat);
        }

        // 反向：选择与 from 最不平行的坐标轴求垂直轴
        let helper = if from.x.abs() < 0.9 {
            Vector3::x()
        } else {
            Vector3::z()
        };
        let axis = Unit::new_normalize(from.cross(&helper));
        Some(UnitQuaternion::from_axis_angle(&axis, constants::PI))
    }
}

// 几何处理模块（多边形法线、中心、最近点）
pub mod geometry;
