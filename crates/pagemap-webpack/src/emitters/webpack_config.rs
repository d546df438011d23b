use minijinja::{AutoEscape, Environment, context};
use pagemap_core::{BuildPlan, EntryMap, GeneratorError};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

const TEMPLATE_NAME: &str = "webpack.config.js.j2";

/// One `HtmlWebpackPlugin` instance; every field is a JS literal.
#[derive(Debug, Serialize)]
struct HtmlPluginContext {
    template: String,
    filename: String,
    chunks: String,
}

#[derive(Debug, Serialize)]
struct CopyPatternContext {
    source: String,
    target: String,
}

#[derive(Debug, Serialize)]
struct DevServerContext {
    static_dir: String,
    compress: bool,
    port: u16,
}

/// Emit `webpack.<suffix>.js` for one build plan.
pub fn emit_webpack_config(plan: &BuildPlan) -> Result<String, GeneratorError> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_template(TEMPLATE_NAME, include_str!("../../templates/webpack.config.js.j2"))
        .map_err(render_error)?;
    let tmpl = env.get_template(TEMPLATE_NAME).map_err(render_error)?;

    let settings = &plan.settings;

    let html_plugins = plan
        .templates
        .iter()
        .map(|t| {
            Ok::<_, GeneratorError>(HtmlPluginContext {
                template: js_string(&t.source_template_path)?,
                filename: js_string(&t.output_filename)?,
                chunks: js_literal("chunks", &t.associated_entry_names)?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let copy = settings
        .copy
        .iter()
        .map(|p| {
            Ok::<_, GeneratorError>(CopyPatternContext {
                source: js_string(&p.from)?,
                target: js_string(&p.to)?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let dev_server = settings
        .dev_server
        .as_ref()
        .map(|server| {
            Ok::<_, GeneratorError>(DevServerContext {
                static_dir: js_string(&server.static_dir)?,
                compress: server.compress,
                port: server.port,
            })
        })
        .transpose()?;

    let image_filename = settings
        .image_filename
        .as_deref()
        .map(js_string)
        .transpose()?;

    let mode = js_string(settings.profile.mode())?;
    let entries = js_entries(&plan.entries)?;
    let function_prefix = js_string(&plan.function_prefix())?;
    let function_filename = js_string(&settings.function_filename)?;
    let page_filename = js_string(&settings.page_filename)?;
    let output_dir = js_string(&settings.output_dir)?;
    let css_filename = js_string(&settings.css_filename)?;

    let mut rendered = tmpl
        .render(context! {
            mode_name => settings.profile.mode(),
            mode,
            error_details => settings.error_details,
            entries,
            function_prefix,
            function_filename,
            page_filename,
            output_dir,
            clean => settings.clean,
            dev_server,
            minify => settings.minify,
            split_chunks => settings.split_chunks,
            html_plugins,
            css_filename,
            copy,
            babel => settings.babel,
            image_filename,
        })
        .map_err(render_error)?;
    rendered.push('\n');
    Ok(rendered)
}

fn render_error(err: minijinja::Error) -> GeneratorError {
    GeneratorError::Render(err.to_string())
}

/// A JSON string literal, which is also a valid JS string literal.
fn js_string(value: &str) -> Result<String, GeneratorError> {
    js_literal("string", &value)
}

fn js_literal<T: Serialize + ?Sized>(
    what: &'static str,
    value: &T,
) -> Result<String, GeneratorError> {
    serde_json::to_string(value).map_err(|source| GeneratorError::Serialize { what, source })
}

/// The entry table as a JS object literal, indented to sit under `entry:`.
fn js_entries(entries: &EntryMap) -> Result<String, GeneratorError> {
    if entries.is_empty() {
        return Ok("{}".to_string());
    }
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    entries
        .serialize(&mut ser)
        .map_err(|source| GeneratorError::Serialize {
            what: "entries",
            source,
        })?;
    let text = String::from_utf8_lossy(&buf);
    Ok(text.replace('\n', "\n    "))
}
