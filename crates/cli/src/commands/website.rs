//! website command - Manage static website hosting of a bucket

use ossctl_core::{CommandDescriptor, CommandGroup, ConfigKind, HelpText, Locale};

use super::bucket_config::{BucketConfigCommand, BUCKET_CONFIG_OPTIONS};

const ENGLISH: HelpText = HelpText {
    synopsis: "manage the static website configuration of a bucket",
    param: "bucket_url [local_xml_file] [options]",
    syntax: "
ossctl website --method put oss://bucket local_xml_file [options]
ossctl website --method get oss://bucket [local_xml_file] [options]
ossctl website --method delete oss://bucket [options]
",
    detail: r#"
website sets, gets or deletes the static website hosting configuration of a
bucket. The configuration names the index and error documents:

    <?xml version="1.0" encoding="UTF-8"?>
    <WebsiteConfiguration>
        <IndexDocument>
            <Suffix>index.html</Suffix>
        </IndexDocument>
        <ErrorDocument>
            <Key>error.html</Key>
        </ErrorDocument>
    </WebsiteConfiguration>
"#,
    sample: "
1) ossctl website --method put oss://bucket website.xml
2) ossctl website --method get oss://bucket
3) ossctl website --method delete oss://bucket
",
};

const CHINESE: HelpText = HelpText {
    synopsis: "设置、查询或者删除bucket的静态网站托管配置",
    param: "bucket_url [local_xml_file] [options]",
    syntax: "",
    detail: "",
    sample: "",
};

pub static DESCRIPTOR: CommandDescriptor = CommandDescriptor {
    name: "website",
    aliases: &[],
    min_args: 1,
    max_args: 2,
    allowed_options: BUCKET_CONFIG_OPTIONS,
    group: CommandGroup::Additional,
    help: &[(Locale::English, ENGLISH), (Locale::Chinese, CHINESE)],
};

pub fn command() -> BucketConfigCommand {
    BucketConfigCommand::new(&DESCRIPTOR, ConfigKind::Website)
}
