/// 附加在消息末尾的终止字节。
/// 提取时遇到的第一个完整的零字节即视为消息结束。
pub const TERMINATOR: u8 = 0x00;

/// 每个载荷字节需要占用的像素数量。
/// 每个像素的 R 通道最低位只存储 1 bit，因此一个字节需要 8 个像素。
pub const PIXELS_PER_BYTE: usize = 8;

/// 写入 R 通道时用于清除最低位的掩码。
pub const CLEAR_LSB_MASK: u8 = 0xFE;

/// 未指定输出路径时，隐写后图像文件名的前缀。
pub const HIDDEN_IMAGE_PREFIX: &str = "doctored_";

/// 未指定输出路径时，恢复出的文本文件名的前缀。
pub const RECOVERED_TEXT_PREFIX: &str = "recovered_";

/// HTTP 服务默认绑定的地址。
pub const DEFAULT_ADDRESS: &str = "0.0.0.0";

/// HTTP 服务默认监听的端口。
pub const DEFAULT_PORT: u16 = 8080;

/// 存放 `index.html` 的默认静态资源目录。
pub const DEFAULT_ASSETS_DIR: &str = "assets";

/// JSON 请求体的默认大小上限 (16 MiB)。
/// base64 编码会使图像体积增大约三分之一。
pub const DEFAULT_BODY_LIMIT: usize = 16 * 1024 * 1024;
