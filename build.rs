//! 编译 Slint 界面描述文件

fn main() {
    slint_build::compile("ui/app_window.slint").expect("Slint 界面编译失败");
}
