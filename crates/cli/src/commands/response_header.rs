//! response-header command - Manage bucket response header rules
//!
//! Response header rules hide selected headers from the responses of the
//! listed operations.

use ossctl_core::{CommandDescriptor, CommandGroup, ConfigKind, HelpText, Locale, OptionKey};

use super::bucket_config::BucketConfigCommand;

const OPTIONS: &[OptionKey] = &[
    OptionKey::ConfigFile,
    OptionKey::Endpoint,
    OptionKey::AccessKeyId,
    OptionKey::AccessKeySecret,
    OptionKey::StsToken,
    OptionKey::ProxyHost,
    OptionKey::ProxyUser,
    OptionKey::ProxyPwd,
    OptionKey::LogLevel,
    OptionKey::Mode,
    OptionKey::EcsRoleName,
    OptionKey::TokenTimeout,
    OptionKey::RamRoleArn,
    OptionKey::RoleSessionName,
    OptionKey::ReadTimeout,
    OptionKey::ConnectTimeout,
    OptionKey::StsRegion,
    OptionKey::Method,
    OptionKey::Item,
    OptionKey::SkipVerifyCert,
    OptionKey::UserAgent,
    OptionKey::SignVersion,
    OptionKey::Region,
    OptionKey::CloudBoxId,
    OptionKey::ForcePathStyle,
];

const ENGLISH: HelpText = HelpText {
    synopsis: "manage the response header configuration of a bucket",
    param: "bucket_url [local_xml_file] [options]",
    syntax: "
ossctl response-header --method put oss://bucket local_xml_file [options]
ossctl response-header --method get oss://bucket [local_xml_file] [options]
ossctl response-header --method delete oss://bucket [options]
",
    detail: r#"
response-header sets, gets or deletes the response header configuration of a
bucket, depending on the --method option: put, get or delete.

There are three usages for this command:

1) ossctl response-header --method put oss://bucket local_xml_file [options]
    Sets the response header configuration of the bucket from local_xml_file.
    The file is an XML document, for example:

    <?xml version="1.0" encoding="UTF-8"?>
    <ResponseHeaderConfiguration>
        <Rule>
            <Name>rule1</Name>
            <Filters>
                <Operation>Put</Operation>
                <Operation>GetObject</Operation>
            </Filters>
            <HideHeaders>
                <Header>Last-Modified</Header>
                <Header>x-oss-request-id</Header>
            </HideHeaders>
        </Rule>
        <Rule>
            <Name>rule2</Name>
            <Filters>
                <Operation>*</Operation>
            </Filters>
            <HideHeaders>
                <Header>Last-Modified</Header>
            </HideHeaders>
        </Rule>
    </ResponseHeaderConfiguration>

2) ossctl response-header --method get oss://bucket [local_xml_file] [options]
    Gets the response header configuration of the bucket. With local_xml_file
    the configuration is written to that file, asking before an existing file
    is overwritten. Without it the configuration is written to stdout.

3) ossctl response-header --method delete oss://bucket [options]
    Deletes the response header configuration of the bucket.
"#,
    sample: "
1) put the response header configuration
    ossctl response-header --method put oss://bucket local_xml_file

2) get the response header configuration, output to stdout
    ossctl response-header --method get oss://bucket

3) get the response header configuration, output to a local file
    ossctl response-header --method get oss://bucket local_xml_file

4) delete the response header configuration
    ossctl response-header --method delete oss://bucket
",
};

const CHINESE: HelpText = HelpText {
    synopsis: "bucket的响应头设置",
    param: "bucket_url [local_xml_file] [options]",
    syntax: "
ossctl response-header --method put oss://bucket local_xml_file [options]
ossctl response-header --method get oss://bucket [local_xml_file] [options]
ossctl response-header --method delete oss://bucket [options]
",
    detail: r#"
response-header 命令通过设置method选项值为put、get、delete,可以设置、查询或者删除
bucket的响应头设置。

该命令有三种用法:

1) ossctl response-header --method put oss://bucket local_xml_file [options]
    从配置文件local_xml_file中读取响应头设置,然后设置bucket的响应头设置。
    配置文件是一个xml格式的文件,举例如下:

    <?xml version="1.0" encoding="UTF-8"?>
    <ResponseHeaderConfiguration>
        <Rule>
            <Name>rule1</Name>
            <Filters>
                <Operation>Put</Operation>
                <Operation>GetObject</Operation>
            </Filters>
            <HideHeaders>
                <Header>Last-Modified</Header>
                <Header>x-oss-request-id</Header>
            </HideHeaders>
        </Rule>
    </ResponseHeaderConfiguration>

2) ossctl response-header --method get oss://bucket [local_xml_file] [options]
    查询bucket的响应头设置。如果输入参数local_xml_file,结果输出到该文件,
    文件已存在时会先询问是否覆盖;否则输出到屏幕上。

3) ossctl response-header --method delete oss://bucket [options]
    删除bucket的响应头设置。
"#,
    sample: "
1) 设置bucket的响应头设置
    ossctl response-header --method put oss://bucket local_xml_file

2) 查询bucket的响应头设置,结果输出到标准输出
    ossctl response-header --method get oss://bucket

3) 查询bucket的响应头设置,结果输出到本地文件
    ossctl response-header --method get oss://bucket local_xml_file

4) 删除bucket的响应头设置
    ossctl response-header --method delete oss://bucket
",
};

pub static DESCRIPTOR: CommandDescriptor = CommandDescriptor {
    name: "response-header",
    aliases: &[],
    min_args: 1,
    max_args: 2,
    allowed_options: OPTIONS,
    group: CommandGroup::Normal,
    help: &[(Locale::English, ENGLISH), (Locale::Chinese, CHINESE)],
};

pub fn command() -> BucketConfigCommand {
    BucketConfigCommand::new(&DESCRIPTOR, ConfigKind::ResponseHeader)
}
