//! 分片规划：把 `total` 字节切成连续、不重叠、无空洞的闭区间。

use crate::internal::downloader::structs::{ByteRange, PlanningError};

/// 第 `i` 个边界：`round(i * total / count)`，四舍五入（half-up），所有边界用同一规则。
fn boundary(i: u64, total: u64, count: u64) -> u64 {
    let numerator = 2 * i as u128 * total as u128 + count as u128;
    (numerator / (2 * count as u128)) as u64
}

/// 规划分片。
///
/// 第 `i` 段为 `[b(i), b(i+1) - 1]`，因此首段从 0 开始、末段止于 `total - 1`，相邻段首尾相接。
/// `workers == 1` 时退化为 `[0, total - 1]`。
/// 资源字节数少于分片数时，分片数收敛为 `total`，保证每段至少 1 字节。
pub fn plan_ranges(
    total: u64,
    workers: usize,
) -> Result<Vec<ByteRange>, PlanningError> {
    if workers == 0 {
        return Err(PlanningError::ZeroWorkers);
    }
    if total == 0 {
        return Err(PlanningError::EmptyResource);
    }

    let count = (workers as u64).min(total);

    let ranges = (0..count)
        .map(|i| ByteRange {
            index: i as usize,
            start: boundary(i, total, count),
            end: boundary(i + 1, total, count) - 1,
        })
        .collect();

    Ok(ranges)
}
