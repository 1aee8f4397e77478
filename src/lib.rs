//! SoftNormal - 网格软法线约束
//!
//! 给定一个多边形网格和一个世界空间位置，求出该位置附近网格表面的
//! “软化”朝向：从最近面出发收集半径内连通的面，平均它们的法线，
//! 再给出把参考轴转到该方向的旋转（XYZ 欧拉角）和参与的面数。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（日志、配置、场景、错误处理）
//! - `math`: 数学库（nalgebra 类型别名、四元数与矩阵辅助函数、几何计算）
//! - `geometry`: 网格模块（查询接口、多边形网格、面邻接、OBJ 加载器）
//! - `constraint`: 约束求解（区域收集、朝向求解、计算入口）
//!
//! # 使用示例
//!
//! ```rust
//! use soft_normal::constraint::{ConstraintInputs, SoftNormalConstraint};
//! use soft_normal::geometry::PolyMesh;
//! use soft_normal::math::{Matrix4, Vector3};
//!
//! let ground = PolyMesh::grid(8, 8, 0.5);
//! let world = Matrix4::new_translation(&Vector3::new(0.0, 0.5, 0.0));
//!
//! let output = SoftNormalConstraint::default()
//!     .compute(&ConstraintInputs::new(&ground, world, 1.0))?;
//! println!("faces = {}", output.out_poly_number);
//! # Ok::<(), soft_normal::core::SoftNormalError>(())
//! ```

pub mod core;
pub mod math;
pub mod geometry;
pub mod constraint;
