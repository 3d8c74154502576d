//! 分片字节区间：闭区间 `[start, end]`，按 index 升序连续覆盖整个资源。

/// 单个分片的字节区间（两端均包含）。
///
/// 由 [`plan_ranges`](crate::functions::plan_ranges) 一次性生成，之后不再修改。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteRange {
    /// 分片序号，从 0 开始
    pub index: usize,
    /// 起始偏移（包含）
    pub start: u64,
    /// 结束偏移（包含）
    pub end: u64,
}

impl ByteRange {
    /// 区间字节数：`end - start + 1`。
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// 规划出的区间不会为空，保留此方法仅为满足 `len` 的惯例。
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// 生成 Range 请求头：`bytes=start-end`。
    pub fn header_value(&self) -> String {
        format!("bytes={}-{}", self.start, self.end)
    }
}
