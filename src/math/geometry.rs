//! 几何数学工具模块
//!
//! 提供多边形网格查询所需的基础几何函数，包括：
//! - 多边形面法线（Newell 方法，适用于任意边数和轻微非平面的多边形）
//! - 多边形中心（顶点平均值）
//! - 点到三角形的最近点
//!
//! 这些函数不依赖网格拓扑，只处理位置数组。

use super::{constants, Point3, Vector3};

/// 计算多边形的单位面法线
///
/// 使用 Newell 方法累加每条边的贡献，对凹多边形和非平面多边形都稳定。
/// 退化多边形（面积为零）返回零向量，调用方在求和时自然忽略它。
///
/// # 算法
///
/// 对每条边 (p_i, p_{i+1})：
/// - n.x += (y_i - y_j) * (z_i + z_j)
/// - n.y += (z_i - z_j) * (x_i + x_j)
/// - n.z += (x_i - x_j) * (y_i + y_j)
///
/// # 示例
///
/// ```rust
/// use soft_normal::math::{Point3, Vector3};
/// use soft_normal::math::geometry::polygon_normal;
///
/// let quad = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(0.0, 0.0, 1.0),
///     Point3::new(1.0, 0.0, 1.0),
///     Point3::new(1.0, 0.0, 0.0),
/// ];
/// assert_eq!(polygon_normal(&quad), Vector3::new(0.0, 1.0, 0.0));
/// ```
pub fn polygon_normal(points: &[Point3]) -> Vector3 {
    let mut normal = Vector3::zeros();

    for (i, current) in points.iter().enumerate() {
        let next = &points[(i + 1) % points.len()];
        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }

    normal
        .try_normalize(constants::EPSILON)
        .unwrap_or_else(Vector3::zeros)
}

/// 计算多边形中心（所有顶点的算术平均）
///
/// 空切片返回原点。
pub fn polygon_center(points: &[Point3]) -> Point3 {
    if points.is_empty() {
        return Point3::origin();
    }

    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Point3::from(sum / points.len() as f64)
}

/// 计算点 `p` 到三角形 (a, b, c) 的最近点
///
/// 按 Voronoi 区域分类（顶点区、边区、面内部），不需要开方。
pub fn closest_point_on_triangle(p: &Point3, a: &Point3, b: &Point3, c: &Point3) -> Point3 {
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;

    let d1 = ab.dot(&ap);
    let d2 = ac.dot(&ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return *a;
    }

    let bp = p - b;
    let d3 = ab.dot(&bp);
    let d4 = ac.dot(&bp);
    if d3 >= 0.0 && d4 <= d3 {
        return *b;
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return a + ab * v;
    }

    let cp = p - c;
    let d5 = ab.dot(&cp);
    let d6 = ac.dot(&cp);
    if d6 >= 0.0 && d5 <= d6 {
        return *c;
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return a + ac * w;
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return b + (c - b) * w;
    }

    let denom = 1.0 / (va + vb + vc);
    let v = vb * denom;
    let w = vc * denom;
    a + ab * v + ac * w
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::utils::{approx_eq, approx_eq_vec3};

    fn unit_triangle() -> [Point3; 3] {
        [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_polygon_normal_ccw_triangle() {
        let tri = unit_triangle();
        let n = polygon_normal(&tri);
        assert!(approx_eq_vec3(&n, &Vector3::z(), 1e-12));
    }

    #[test]
    fn test_polygon_normal_degenerate() {
        let line = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        assert_eq!(polygon_normal(&line), Vector3::zeros());
    }

    #[test]
    fn test_polygon_center() {
        let quad = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 2.0),
            Point3::new(0.0, 0.0, 2.0),
        ];
        let c = polygon_center(&quad);
        assert!(approx_eq(c.x, 1.0, 1e-12));
        assert!(approx_eq(c.y, 0.0, 1e-12));
        assert!(approx_eq(c.z, 1.0, 1e-12));
    }

    #[test]
    fn test_closest_point_inside_face() {
        let [a, b, c] = unit_triangle();
        let p = Point3::new(0.25, 0.25, 3.0);
        let q = closest_point_on_triangle(&p, &a, &b, &c);
        assert!(approx_eq_vec3(&q.coords, &Vector3::new(0.25, 0.25, 0.0), 1e-12));
    }

    #[test]
    fn test_closest_point_vertex_region() {
        let [a, b, c] = unit_triangle();
        let p = Point3::new(-1.0, -1.0, 0.0);
        assert_eq!(closest_point_on_triangle(&p, &a, &b, &c), a);

        let p = Point3::new(2.0, -0.5, 1.0);
        assert_eq!(closest_point_on_triangle(&p, &a, &b, &c), b);
    }

    #[test]
    fn test_closest_point_edge_region() {
        let [a, b, c] = unit_triangle();
        // 斜边 bc 外侧
        let p = Point3::new(1.0, 1.0, 0.0);
        let q = closest_point_on_triangle(&p, &a, &b, &c);
        assert!(approx_eq_vec3(&q.coords, &Vector3::new(0.5, 0.5, 0.0), 1e-12));
    }
}
