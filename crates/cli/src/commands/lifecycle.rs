//! lifecycle command - Manage bucket lifecycle rules

use ossctl_core::{CommandDescriptor, CommandGroup, ConfigKind, HelpText, Locale};

use super::bucket_config::{BucketConfigCommand, BUCKET_CONFIG_OPTIONS};

const ENGLISH: HelpText = HelpText {
    synopsis: "manage the lifecycle configuration of a bucket",
    param: "bucket_url [local_xml_file] [options]",
    syntax: "
ossctl lifecycle --method put oss://bucket local_xml_file [options]
ossctl lifecycle --method get oss://bucket [local_xml_file] [options]
ossctl lifecycle --method delete oss://bucket [options]
",
    detail: r#"
lifecycle sets, gets or deletes the lifecycle rules of a bucket. Lifecycle
rules expire objects or move them to a colder storage class after a number
of days.

A put payload looks like:

    <?xml version="1.0" encoding="UTF-8"?>
    <LifecycleConfiguration>
        <Rule>
            <ID>expire-logs</ID>
            <Prefix>logs/</Prefix>
            <Status>Enabled</Status>
            <Expiration>
                <Days>30</Days>
            </Expiration>
        </Rule>
    </LifecycleConfiguration>

get writes the rules to local_xml_file when given and to stdout otherwise.
"#,
    sample: "
1) ossctl lifecycle --method put oss://bucket lifecycle.xml
2) ossctl lifecycle --method get oss://bucket lifecycle.xml
3) ossctl lifecycle --method delete oss://bucket
",
};

const CHINESE: HelpText = HelpText {
    synopsis: "设置、查询或者删除bucket的生命周期配置",
    param: "bucket_url [local_xml_file] [options]",
    syntax: "",
    detail: "
lifecycle 命令可以设置、查询或者删除bucket的生命周期规则。生命周期规则在指定天数后
删除object或将其转换为低频存储类型。
",
    sample: "
1) ossctl lifecycle --method put oss://bucket lifecycle.xml
2) ossctl lifecycle --method get oss://bucket
3) ossctl lifecycle --method delete oss://bucket
",
};

pub static DESCRIPTOR: CommandDescriptor = CommandDescriptor {
    name: "lifecycle",
    aliases: &[],
    min_args: 1,
    max_args: 2,
    allowed_options: BUCKET_CONFIG_OPTIONS,
    group: CommandGroup::Normal,
    help: &[(Locale::English, ENGLISH), (Locale::Chinese, CHINESE)],
};

pub fn command() -> BucketConfigCommand {
    BucketConfigCommand::new(&DESCRIPTOR, ConfigKind::Lifecycle)
}
