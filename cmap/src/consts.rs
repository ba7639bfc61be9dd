//! Constants for table generation
//! 表生成常量

/// Prefix of every generated table name
/// 生成表名的前缀
pub const TABLE_PREFIX: &str = "ZZ_CMAP_";

/// Conventional name of the final (class id) table
/// 最终（类别 id）表的惯用名称
pub const FINAL_TABLE: &str = "ZZ_CMAP_A";

/// Default input variable in the access formula
/// 访问公式中默认的输入变量
pub const DEFAULT_VAR: &str = "ch";

/// Default upper bound on lookup levels
/// 默认的最大查找层数
pub const DEFAULT_PARTITIONS: usize = 3;

/// Index tables are lettered `Z` down to `B`, `A` is the final table
/// 索引表从 `Z` 依次命名到 `B`，`A` 为最终表
pub const MAX_PARTITIONS: usize = 26;

/// Cost of a partition whose tables cannot be built
/// 无法构建表的划分的代价
pub const INFEASIBLE: usize = usize::MAX;

/// Bits in a storage unit of a packed final table
/// 打包最终表中存储单元的位数
pub const UNIT_BITS: u32 = 32;

/// Bits of one literal character
/// 字面量单个字符的位数
pub const CHAR_BITS: u32 = 16;
