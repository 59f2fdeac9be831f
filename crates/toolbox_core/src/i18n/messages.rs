pub(super) const ZH: &[(&str, &str)] = &[
    ("site.title", "开发者工具箱"),
    ("site.description", "免费在线开发者工具集合：Base64 编解码、JSON 格式化、URL 编解码、密码生成、颜色转换、时间戳转换、二维码生成和 Markdown 预览。"),
    ("site.keywords", "开发者工具,在线工具,Base64,JSON 格式化,URL 编码,密码生成器,颜色转换,时间戳,二维码,Markdown"),
    ("nav.home", "首页"),
    ("nav.tools", "工具"),
    ("nav.toggle_sidebar", "切换侧边栏"),
    ("nav.expand_all", "全部展开"),
    ("nav.collapse_all", "全部折叠"),
    ("nav.language", "语言"),
    ("nav.theme", "主题"),
    ("theme.light", "浅色"),
    ("theme.dark", "深色"),
    ("theme.system", "跟随系统"),
    ("palette.placeholder", "搜索工具..."),
    ("palette.empty", "没有找到匹配的工具"),
    ("palette.shortcut_hint", "按 {shortcut} 打开命令面板"),
    ("home.heading", "开发者工具箱"),
    ("home.subtitle", "简单、快速、免费的在线工具"),
    ("home.tool_count", "共 {count} 个工具"),
    ("home.search_results", "“{query}” 的搜索结果"),
    ("page.not_found.title", "页面未找到"),
    ("page.not_found.description", "你访问的工具不存在。"),
    ("page.back_home", "返回首页"),
    ("form.submit", "执行"),
    ("form.output", "结果"),
    ("form.error", "出错了"),
    ("form.invalid_input", "部分字段无法解析：{detail}"),
    ("form.preview", "预览"),
    ("category.encoding.name", "编码解码"),
    ("category.formatting.name", "格式化"),
    ("category.generators.name", "生成器"),
    ("category.converters.name", "转换器"),
    ("tool.base64.name", "Base64 编解码"),
    ("tool.base64.description", "将文本编码为 Base64 或将 Base64 解码为文本，支持中文和 URL 安全字符集。"),
    ("tool.url-encode.name", "URL 编解码"),
    ("tool.url-encode.description", "对 URL 或 URL 参数进行百分号编码和解码。"),
    ("tool.json-formatter.name", "JSON 格式化"),
    ("tool.json-formatter.description", "格式化、压缩和校验 JSON 数据，可选按键排序。"),
    ("tool.markdown-preview.name", "Markdown 预览"),
    ("tool.markdown-preview.description", "实时将 Markdown 渲染为 HTML，支持表格、任务列表和脚注。"),
    ("tool.password-generator.name", "密码生成器"),
    ("tool.password-generator.description", "生成安全的随机密码，可选择字符类型并排除易混淆字符。"),
    ("tool.qr-code.name", "二维码生成"),
    ("tool.qr-code.description", "将文本或链接生成二维码图片。"),
    ("tool.color-converter.name", "颜色转换"),
    ("tool.color-converter.description", "在 HEX、RGB 和 HSL 颜色格式之间相互转换。"),
    ("tool.timestamp.name", "时间戳转换"),
    ("tool.timestamp.description", "Unix 时间戳与日期时间相互转换，支持秒和毫秒。"),
    ("field.action", "操作"),
    ("field.text", "输入"),
    ("field.url_safe", "URL 安全"),
    ("field.mode", "模式"),
    ("field.indent", "缩进"),
    ("field.sort_keys", "按键排序"),
    ("field.markdown", "Markdown"),
    ("field.length", "长度"),
    ("field.count", "数量"),
    ("field.uppercase", "大写字母"),
    ("field.lowercase", "小写字母"),
    ("field.numbers", "数字"),
    ("field.symbols", "特殊符号"),
    ("field.exclude_similar", "排除易混淆字符"),
    ("field.size", "尺寸"),
    ("field.color", "颜色"),
    ("field.value", "值"),
    ("field.unit", "单位"),
    ("field.offset", "时区偏移"),
    ("field.format", "图片格式"),
    ("option.encode", "编码"),
    ("option.decode", "解码"),
    ("option.format", "格式化"),
    ("option.minify", "压缩"),
    ("option.validate", "校验"),
    ("option.component", "参数 (encodeURIComponent)"),
    ("option.uri", "完整 URL (encodeURI)"),
    ("option.auto", "自动"),
    ("option.seconds", "秒"),
    ("option.milliseconds", "毫秒"),
    ("option.to_datetime", "时间戳转日期"),
    ("option.to_timestamp", "日期转时间戳"),
    ("option.now", "当前时间"),
    ("option.tab", "Tab"),
    ("option.png", "PNG"),
    ("option.svg", "SVG"),
];

pub(super) const EN: &[(&str, &str)] = &[
    ("site.title", "Dev Toolbox"),
    ("site.description", "Free online developer tools: Base64 encode/decode, JSON formatter, URL encode/decode, password generator, color converter, timestamp converter, QR code generator and Markdown preview."),
    ("site.keywords", "developer tools,online tools,base64,json formatter,url encode,password generator,color converter,timestamp,qr code,markdown"),
    ("nav.home", "Home"),
    ("nav.tools", "Tools"),
    ("nav.toggle_sidebar", "Toggle sidebar"),
    ("nav.expand_all", "Expand all"),
    ("nav.collapse_all", "Collapse all"),
    ("nav.language", "Language"),
    ("nav.theme", "Theme"),
    ("theme.light", "Light"),
    ("theme.dark", "Dark"),
    ("theme.system", "System"),
    ("palette.placeholder", "Search tools..."),
    ("palette.empty", "No matching tools"),
    ("palette.shortcut_hint", "Press {shortcut} to open the command palette"),
    ("home.heading", "Dev Toolbox"),
    ("home.subtitle", "Simple, fast and free online tools"),
    ("home.tool_count", "{count} tools"),
    ("home.search_results", "Results for “{query}”"),
    ("page.not_found.title", "Page not found"),
    ("page.not_found.description", "The tool you are looking for does not exist."),
    ("page.back_home", "Back to home"),
    ("form.submit", "Run"),
    ("form.output", "Output"),
    ("form.error", "Something went wrong"),
    ("form.invalid_input", "Some fields could not be read: {detail}"),
    ("form.preview", "Preview"),
    ("category.encoding.name", "Encoding"),
    ("category.formatting.name", "Formatting"),
    ("category.generators.name", "Generators"),
    ("category.converters.name", "Converters"),
    ("tool.base64.name", "Base64 Encode/Decode"),
    ("tool.base64.description", "Encode text to Base64 or decode Base64 back to text, with full UTF-8 and URL-safe alphabet support."),
    ("tool.url-encode.name", "URL Encode/Decode"),
    ("tool.url-encode.description", "Percent-encode and decode URLs and URL components."),
    ("tool.json-formatter.name", "JSON Formatter"),
    ("tool.json-formatter.description", "Pretty-print, minify and validate JSON, optionally sorting object keys."),
    ("tool.markdown-preview.name", "Markdown Preview"),
    ("tool.markdown-preview.description", "Render Markdown to HTML with tables, task lists and footnotes."),
    ("tool.password-generator.name", "Password Generator"),
    ("tool.password-generator.description", "Generate strong random passwords from the character sets you choose, optionally excluding look-alike characters."),
    ("tool.qr-code.name", "QR Code Generator"),
    ("tool.qr-code.description", "Turn any text or link into a QR code image."),
    ("tool.color-converter.name", "Color Converter"),
    ("tool.color-converter.description", "Convert colors between HEX, RGB and HSL."),
    ("tool.timestamp.name", "Timestamp Converter"),
    ("tool.timestamp.description", "Convert between Unix timestamps and dates, in seconds or milliseconds."),
    ("field.action", "Action"),
    ("field.text", "Input"),
    ("field.url_safe", "URL-safe"),
    ("field.mode", "Mode"),
    ("field.indent", "Indent"),
    ("field.sort_keys", "Sort keys"),
    ("field.markdown", "Markdown"),
    ("field.length", "Length"),
    ("field.count", "Count"),
    ("field.uppercase", "Uppercase"),
    ("field.lowercase", "Lowercase"),
    ("field.numbers", "Numbers"),
    ("field.symbols", "Symbols"),
    ("field.exclude_similar", "Exclude similar characters"),
    ("field.size", "Size"),
    ("field.color", "Color"),
    ("field.value", "Value"),
    ("field.unit", "Unit"),
    ("field.offset", "UTC offset"),
    ("field.format", "Image format"),
    ("option.encode", "Encode"),
    ("option.decode", "Decode"),
    ("option.format", "Format"),
    ("option.minify", "Minify"),
    ("option.validate", "Validate"),
    ("option.component", "Component (encodeURIComponent)"),
    ("option.uri", "Full URI (encodeURI)"),
    ("option.auto", "Auto"),
    ("option.seconds", "Seconds"),
    ("option.milliseconds", "Milliseconds"),
    ("option.to_datetime", "Timestamp to date"),
    ("option.to_timestamp", "Date to timestamp"),
    ("option.now", "Now"),
    ("option.tab", "Tab"),
    ("option.png", "PNG"),
    ("option.svg", "SVG"),
];
