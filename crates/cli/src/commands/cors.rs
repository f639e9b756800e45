//! cors command - Manage bucket CORS rules

use ossctl_core::{CommandDescriptor, CommandGroup, ConfigKind, HelpText, Locale};

use super::bucket_config::{BucketConfigCommand, BUCKET_CONFIG_OPTIONS};

const ENGLISH: HelpText = HelpText {
    synopsis: "manage the CORS configuration of a bucket",
    param: "bucket_url [local_xml_file] [options]",
    syntax: "
ossctl cors --method put oss://bucket local_xml_file [options]
ossctl cors --method get oss://bucket [local_xml_file] [options]
ossctl cors --method delete oss://bucket [options]
",
    detail: r#"
cors sets, gets or deletes the cross-origin resource sharing rules of a
bucket, depending on the --method option: put, get or delete.

1) ossctl cors --method put oss://bucket local_xml_file [options]
    Replaces the CORS rules of the bucket with the rules in local_xml_file:

    <?xml version="1.0" encoding="UTF-8"?>
    <CORSConfiguration>
        <CORSRule>
            <AllowedOrigin>https://www.example.com</AllowedOrigin>
            <AllowedMethod>PUT</AllowedMethod>
            <AllowedMethod>GET</AllowedMethod>
            <AllowedHeader>Authorization</AllowedHeader>
            <ExposeHeader>x-oss-request-id</ExposeHeader>
            <MaxAgeSeconds>100</MaxAgeSeconds>
        </CORSRule>
    </CORSConfiguration>

2) ossctl cors --method get oss://bucket [local_xml_file] [options]
    Gets the CORS rules of the bucket, to local_xml_file if given and to
    stdout otherwise. An existing file is only overwritten after confirmation.

3) ossctl cors --method delete oss://bucket [options]
    Deletes all CORS rules of the bucket.
"#,
    sample: "
1) ossctl cors --method put oss://bucket cors.xml
2) ossctl cors --method get oss://bucket
3) ossctl cors --method get oss://bucket cors.xml
4) ossctl cors --method delete oss://bucket
",
};

const CHINESE: HelpText = HelpText {
    synopsis: "设置、查询或者删除bucket的cors配置",
    param: "bucket_url [local_xml_file] [options]",
    syntax: "
ossctl cors --method put oss://bucket local_xml_file [options]
ossctl cors --method get oss://bucket [local_xml_file] [options]
ossctl cors --method delete oss://bucket [options]
",
    detail: "
cors 命令通过设置method选项值为put、get、delete,可以设置、查询或者删除bucket的
跨域资源共享规则。put从local_xml_file读取规则;get在输入local_xml_file时输出到该
文件,否则输出到屏幕上;delete删除全部规则。
",
    sample: "
1) ossctl cors --method put oss://bucket cors.xml
2) ossctl cors --method get oss://bucket
3) ossctl cors --method delete oss://bucket
",
};

pub static DESCRIPTOR: CommandDescriptor = CommandDescriptor {
    name: "cors",
    aliases: &[],
    min_args: 1,
    max_args: 2,
    allowed_options: BUCKET_CONFIG_OPTIONS,
    group: CommandGroup::Normal,
    help: &[(Locale::English, ENGLISH), (Locale::Chinese, CHINESE)],
};

pub fn command() -> BucketConfigCommand {
    BucketConfigCommand::new(&DESCRIPTOR, ConfigKind::Cors)
}
