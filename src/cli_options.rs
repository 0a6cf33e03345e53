use std::collections::HashMap;

pub struct CliOptions {
    pub use_multi_thread: bool,
    pub scene_name: Option<String>,
    pub obj_file: Option<String>,
    pub output: String,
    pub width: u32,
    pub height: u32,
    pub depth: usize,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            use_multi_thread: true,
            scene_name: None,
            obj_file: None,
            output: "output.png".to_string(),
            width: 800,
            height: 600,
            depth: scene::DEFAULT_RECURSION_DEPTH,
        }
    }
}

impl CliOptions {
    pub fn message() -> &'static str {
        r#"
        --use_multi_thread | --use_single_thread
        --scene_name <scene_name>
        --obj_file <file.obj>
        --output <file.png>
        --width <pixels>
        --height <pixels>
        --depth <max_ray_bounces>
        "#
    }
}

pub fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut pairs: HashMap<String, Option<String>> = HashMap::new();
    let mut args = args.into_iter().rev().collect::<Vec<_>>();
    args.pop(); // Removes args[0]

    while let Some(key) = args.pop() {
        if !key.starts_with('-') {
            return Err(format!("Unrecognized key {}", key));
        }
        match args.last() {
            None => {
                pairs.insert(key, None);
            }
            Some(value) => {
                if value.starts_with('-') {
                    pairs.insert(key, None);
                } else {
                    let value = args.pop();
                    pairs.insert(key, value);
                }
            }
        }
    }
    let mut options = CliOptions::default();
    for (k, v) in pairs.into_iter() {
        match k.as_str() {
            "--use_multi_thread" => options.use_multi_thread = true,
            "--use_single_thread" => options.use_multi_thread = false,
            "--scene_name" => options.scene_name = v,
            "--obj_file" => options.obj_file = v,
            "--output" => {
                options.output = v.ok_or_else(|| "--output needs a file name".to_string())?
            }
            "--width" => options.width = parse_number(&k, v)?,
            "--height" => options.height = parse_number(&k, v)?,
            "--depth" => options.depth = parse_number(&k, v)?,
            "--help" => {
                println!("usage: {}", CliOptions::message());
            }
            _ => return Err(format!("Unrecognized key {}", k)),
        }
    }
    Ok(options)
}

fn parse_number<T: std::str::FromStr>(key: &str, value: Option<String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{} needs a value", key))?;
    value
        .parse()
        .map_err(|_| format!("{} got a malformed value: {}", key, value))
}
